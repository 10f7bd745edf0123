// Voteban domain models.

use crate::core::moderation::{MessageRef, Participant};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("You can't vote in a voteban against yourself")]
    SelfVote,

    #[error("You already voted this way")]
    DuplicateVote,

    #[error("This vote is no longer active")]
    PollNotFound,

    #[error("A vote is already running for poll {0}")]
    DuplicatePoll(u64),

    #[error("Administrators can't be votebanned")]
    TargetIsAdmin,

    #[error("You can't start a voteban against yourself")]
    TargetIsSelf,

    #[error("Bots can't be votebanned")]
    TargetIsBot,
}

/// Where a session is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    ResolvedBan,
    ResolvedDismiss,
}

/// Which way a vote went once the threshold was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ban,
    Dismiss,
}

/// One voter's current choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    pub voter: Participant,
    pub wants_ban: bool,
}

/// Counts and voter names for both sides, used to redraw the poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    pub threshold: usize,
    pub ban_voters: Vec<String>,
    pub keep_voters: Vec<String>,
}

impl VoteTally {
    pub fn ban_count(&self) -> usize {
        self.ban_voters.len()
    }

    pub fn keep_count(&self) -> usize {
        self.keep_voters.len()
    }
}

/// What the poll message shows while voting is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollView {
    pub target_label: String,
    pub initiator_label: String,
    pub opened_at: DateTime<Utc>,
    pub tally: VoteTally,
}

impl PollView {
    /// The view of a freshly opened poll: only the initiator's ban vote.
    pub fn opening(request: &VotebanRequest, threshold: usize, opened_at: DateTime<Utc>) -> Self {
        Self {
            target_label: request.target.label().to_string(),
            initiator_label: request.initiator.label().to_string(),
            opened_at,
            tally: VoteTally {
                threshold,
                ban_voters: vec![request.initiator.label().to_string()],
                keep_voters: Vec::new(),
            },
        }
    }
}

/// Everything the enforcer needs once a session has been decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub poll_id: u64,
    pub chat_id: u64,
    pub poll_message: MessageRef,
    pub target: Participant,
    pub target_message: MessageRef,
    pub verdict: Verdict,
    pub tally: VoteTally,
}

/// Result of a successful vote cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Still open; redraw the poll.
    Pending(PollView),
    /// Threshold reached. The session is already gone from the registry.
    Resolved(Resolution),
}

/// Parameters for opening a new voteban.
#[derive(Debug, Clone)]
pub struct VotebanRequest {
    pub chat_id: u64,
    pub initiator: Participant,
    pub target: Participant,
    pub target_message: MessageRef,
    pub target_is_admin: bool,
    pub target_is_bot: bool,
}

impl VotebanRequest {
    /// Reject requests that must never open a poll.
    pub fn validate(&self) -> Result<(), VoteError> {
        if self.initiator.id == self.target.id {
            return Err(VoteError::TargetIsSelf);
        }
        if self.target_is_bot {
            return Err(VoteError::TargetIsBot);
        }
        if self.target_is_admin {
            return Err(VoteError::TargetIsAdmin);
        }
        Ok(())
    }
}
