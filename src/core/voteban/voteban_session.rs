// A single voteban poll.
//
// Open -> ResolvedBan | ResolvedDismiss. The initiator's ban vote is recorded
// on creation. A session only ever changes through `cast_vote`, and the
// registry guarantees one cast at a time per session.

use super::voteban_models::{
    Ballot, PollView, Resolution, SessionState, Verdict, VoteError, VoteOutcome, VoteTally,
    VotebanRequest,
};
use crate::core::moderation::{MessageRef, Participant};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct VotebanSession {
    chat_id: u64,
    poll_message: MessageRef,
    target: Participant,
    target_message: MessageRef,
    initiator: Participant,
    /// Voter id -> ballot. Keyed by id so each voter has exactly one entry.
    votes: BTreeMap<u64, Ballot>,
    threshold: usize,
    state: SessionState,
    opened_at: DateTime<Utc>,
}

impl VotebanSession {
    /// Open a session anchored on `poll_message`.
    ///
    /// The request is validated again here so an invalid session can never
    /// be built, even if the caller skipped `VotebanRequest::validate`.
    pub fn open(
        request: VotebanRequest,
        poll_message: MessageRef,
        threshold: usize,
        opened_at: DateTime<Utc>,
    ) -> Result<Self, VoteError> {
        request.validate()?;

        let mut votes = BTreeMap::new();
        votes.insert(
            request.initiator.id,
            Ballot {
                voter: request.initiator.clone(),
                wants_ban: true,
            },
        );

        Ok(Self {
            chat_id: request.chat_id,
            poll_message,
            target: request.target,
            target_message: request.target_message,
            initiator: request.initiator,
            votes,
            threshold,
            state: SessionState::Open,
            opened_at,
        })
    }

    /// Anchor message id; the registry key.
    pub fn poll_id(&self) -> u64 {
        self.poll_message.message_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    #[cfg(test)]
    pub fn target(&self) -> &Participant {
        &self.target
    }

    /// The recorded choice of `voter_id`, if any.
    pub fn vote_of(&self, voter_id: u64) -> Option<bool> {
        self.votes.get(&voter_id).map(|b| b.wants_ban)
    }

    #[cfg(test)]
    pub fn voter_count(&self) -> usize {
        self.votes.len()
    }

    /// Record a vote and resolve if either side reaches the threshold.
    pub fn cast_vote(&mut self, voter: Participant, wants_ban: bool) -> Result<VoteOutcome, VoteError> {
        if self.state != SessionState::Open {
            return Err(VoteError::PollNotFound);
        }
        if voter.id == self.target.id {
            return Err(VoteError::SelfVote);
        }
        if self.vote_of(voter.id) == Some(wants_ban) {
            return Err(VoteError::DuplicateVote);
        }

        self.votes.insert(voter.id, Ballot { voter, wants_ban });

        // Both checks read the same post-mutation snapshot.
        let tally = self.tally();
        if tally.ban_count() >= self.threshold {
            self.state = SessionState::ResolvedBan;
            return Ok(VoteOutcome::Resolved(self.resolution(Verdict::Ban, tally)));
        }
        if tally.keep_count() >= self.threshold {
            self.state = SessionState::ResolvedDismiss;
            return Ok(VoteOutcome::Resolved(self.resolution(Verdict::Dismiss, tally)));
        }

        Ok(VoteOutcome::Pending(self.view_with(tally)))
    }

    /// Current vote counts and voter names, in voter-id order.
    pub fn tally(&self) -> VoteTally {
        let mut ban_voters = Vec::new();
        let mut keep_voters = Vec::new();
        for ballot in self.votes.values() {
            let name = ballot.voter.label().to_string();
            if ballot.wants_ban {
                ban_voters.push(name);
            } else {
                keep_voters.push(name);
            }
        }

        VoteTally {
            threshold: self.threshold,
            ban_voters,
            keep_voters,
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> PollView {
        self.view_with(self.tally())
    }

    fn view_with(&self, tally: VoteTally) -> PollView {
        PollView {
            target_label: self.target.label().to_string(),
            initiator_label: self.initiator.label().to_string(),
            opened_at: self.opened_at,
            tally,
        }
    }

    fn resolution(&self, verdict: Verdict, tally: VoteTally) -> Resolution {
        Resolution {
            poll_id: self.poll_id(),
            chat_id: self.chat_id,
            poll_message: self.poll_message,
            target: self.target.clone(),
            target_message: self.target_message,
            verdict,
            tally,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: u64 = 10;
    const INITIATOR: u64 = 20;

    fn person(id: u64) -> Participant {
        Participant::new(id, Some(format!("user{}", id)))
    }

    fn request() -> VotebanRequest {
        VotebanRequest {
            chat_id: 1,
            initiator: person(INITIATOR),
            target: person(TARGET),
            target_message: MessageRef::new(5, 50),
            target_is_admin: false,
            target_is_bot: false,
        }
    }

    fn session(threshold: usize) -> VotebanSession {
        VotebanSession::open(request(), MessageRef::new(5, 99), threshold, Utc::now()).unwrap()
    }

    #[test]
    fn test_initiator_vote_is_precounted() {
        let s = session(3);
        assert_eq!(s.vote_of(INITIATOR), Some(true));
        assert_eq!(s.tally().ban_count(), 1);
        assert_eq!(s.poll_id(), 99);
        assert_eq!(s.state(), SessionState::Open);
    }

    #[test]
    fn test_open_rejects_invalid_requests() {
        let mut self_target = request();
        self_target.target = person(INITIATOR);
        assert_eq!(
            VotebanSession::open(self_target, MessageRef::new(5, 99), 2, Utc::now()).unwrap_err(),
            VoteError::TargetIsSelf
        );

        let mut admin_target = request();
        admin_target.target_is_admin = true;
        assert_eq!(
            VotebanSession::open(admin_target, MessageRef::new(5, 99), 2, Utc::now()).unwrap_err(),
            VoteError::TargetIsAdmin
        );

        let mut bot_target = request();
        bot_target.target_is_bot = true;
        assert_eq!(bot_target.validate(), Err(VoteError::TargetIsBot));
    }

    #[test]
    fn test_target_cannot_vote() {
        let mut s = session(2);
        assert_eq!(s.cast_vote(person(TARGET), false), Err(VoteError::SelfVote));
        assert_eq!(s.cast_vote(person(TARGET), true), Err(VoteError::SelfVote));
        assert_eq!(s.vote_of(TARGET), None);
    }

    #[test]
    fn test_duplicate_vote_is_noop() {
        let mut s = session(5);
        s.cast_vote(person(30), false).unwrap();
        let before = s.tally();

        assert_eq!(s.cast_vote(person(30), false), Err(VoteError::DuplicateVote));
        assert_eq!(s.cast_vote(person(INITIATOR), true), Err(VoteError::DuplicateVote));
        assert_eq!(s.tally(), before);
        assert_eq!(s.state(), SessionState::Open);
    }

    #[test]
    fn test_changing_vote_moves_it() {
        let mut s = session(5);
        s.cast_vote(person(30), true).unwrap();
        assert_eq!(s.tally().ban_count(), 2);

        let outcome = s.cast_vote(person(30), false).unwrap();
        let VoteOutcome::Pending(view) = outcome else {
            panic!("expected pending outcome");
        };
        assert_eq!(view.tally.ban_count(), 1);
        assert_eq!(view.tally.keep_count(), 1);
        assert_eq!(view.tally.keep_voters, vec!["user30"]);
        assert_eq!(s.voter_count(), 2);
    }

    #[test]
    fn test_initiator_can_change_their_mind() {
        let mut s = session(2);
        s.cast_vote(person(INITIATOR), false).unwrap();
        assert_eq!(s.tally().ban_count(), 0);
        assert_eq!(s.tally().keep_count(), 1);
    }

    #[test]
    fn test_ban_threshold_resolves() {
        let mut s = session(2);
        let outcome = s.cast_vote(person(30), true).unwrap();

        let VoteOutcome::Resolved(resolution) = outcome else {
            panic!("expected resolution");
        };
        assert_eq!(resolution.verdict, Verdict::Ban);
        assert_eq!(resolution.target.id, TARGET);
        assert_eq!(resolution.target_message, MessageRef::new(5, 50));
        assert_eq!(resolution.poll_message, MessageRef::new(5, 99));
        assert_eq!(s.state(), SessionState::ResolvedBan);
    }

    #[test]
    fn test_keep_threshold_dismisses() {
        let mut s = session(2);
        assert!(matches!(
            s.cast_vote(person(30), false).unwrap(),
            VoteOutcome::Pending(_)
        ));

        let VoteOutcome::Resolved(resolution) = s.cast_vote(person(31), false).unwrap() else {
            panic!("expected resolution");
        };
        assert_eq!(resolution.verdict, Verdict::Dismiss);
        assert_eq!(resolution.tally.keep_count(), 2);
        assert_eq!(s.state(), SessionState::ResolvedDismiss);
    }

    #[test]
    fn test_resolved_session_rejects_votes() {
        let mut s = session(2);
        s.cast_vote(person(30), true).unwrap();

        assert_eq!(s.cast_vote(person(31), false), Err(VoteError::PollNotFound));
    }

    #[test]
    fn test_target_never_in_vote_map() {
        let mut s = session(4);
        let sequence = [
            (30, true),
            (TARGET, true),
            (31, false),
            (TARGET, false),
            (30, false),
            (32, false),
        ];
        for (voter, wants_ban) in sequence {
            let _ = s.cast_vote(person(voter), wants_ban);
            assert_eq!(s.vote_of(TARGET), None);
        }
    }

    #[test]
    fn test_unnamed_voter_gets_fallback_label() {
        let mut s = session(5);
        s.cast_vote(Participant::new(40, None), false).unwrap();
        assert_eq!(s.tally().keep_voters, vec!["Unnamed"]);
    }

    #[test]
    fn test_opening_view_matches_fresh_session() {
        let now = Utc::now();
        let s = VotebanSession::open(request(), MessageRef::new(5, 99), 3, now).unwrap();
        assert_eq!(PollView::opening(&request(), 3, now), s.view());
    }
}
