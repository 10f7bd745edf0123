// Process-wide table of open voteban sessions, keyed by anchor message id.
//
// Each session sits behind its own async mutex. A vote takes the lock,
// transitions the session and, if it resolved, removes it from the table
// before the lock is released. A second vote racing on the same poll waits
// for the lock, then sees a resolved session and gets `PollNotFound`.

use super::voteban_models::{SessionState, VoteError, VoteOutcome};
use super::voteban_session::VotebanSession;
use crate::core::moderation::Participant;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedSession = Arc<Mutex<VotebanSession>>;

#[derive(Default)]
pub struct VotebanRegistry {
    sessions: DashMap<u64, SharedSession>,
}

impl VotebanRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a freshly opened session under its poll id.
    pub fn create(&self, session: VotebanSession) -> Result<SharedSession, VoteError> {
        let poll_id = session.poll_id();
        match self.sessions.entry(poll_id) {
            Entry::Occupied(_) => Err(VoteError::DuplicatePoll(poll_id)),
            Entry::Vacant(slot) => {
                let shared = Arc::new(Mutex::new(session));
                slot.insert(Arc::clone(&shared));
                Ok(shared)
            }
        }
    }

    pub fn get(&self, poll_id: u64) -> Option<SharedSession> {
        // Clone the Arc so no shard lock is held while callers await the mutex.
        self.sessions.get(&poll_id).map(|s| Arc::clone(s.value()))
    }

    pub fn remove(&self, poll_id: u64) -> Option<SharedSession> {
        self.sessions.remove(&poll_id).map(|(_, s)| s)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Cast a vote on poll `poll_id` and hand the outcome to `then`.
    ///
    /// Lookup, transition, removal-on-resolution and `then` all run under the
    /// session's lock, so a poll resolves exactly once and whatever `then`
    /// publishes (a redrawn poll message) lands in vote order.
    pub async fn cast_vote<F, Fut, T>(
        &self,
        poll_id: u64,
        voter: Participant,
        wants_ban: bool,
        then: F,
    ) -> Result<T, VoteError>
    where
        F: FnOnce(VoteOutcome) -> Fut,
        Fut: Future<Output = T>,
    {
        let shared = self.get(poll_id).ok_or(VoteError::PollNotFound)?;
        let mut session = shared.lock().await;

        if session.state() != SessionState::Open {
            return Err(VoteError::PollNotFound);
        }

        let outcome = session.cast_vote(voter, wants_ban)?;
        if let VoteOutcome::Resolved(_) = &outcome {
            self.remove(poll_id);
            tracing::debug!(poll_id, "Voteban session resolved and removed");
        }

        let result = then(outcome).await;
        drop(session);
        Ok(result)
    }
}
