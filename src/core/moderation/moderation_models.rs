// Moderation domain models - data structures for automatic moderation.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer converts incoming messages into these.

/// Label used when a participant has no display name.
pub const UNNAMED_PARTICIPANT: &str = "Unnamed";

/// Someone acting in the chat: a message author, a voter, a voteban target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: u64,
    pub display_name: Option<String>,
}

impl Participant {
    pub fn new(id: u64, display_name: Option<String>) -> Self {
        Self { id, display_name }
    }

    /// Display name, or a fallback label when the platform gave us none.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(UNNAMED_PARTICIPANT)
    }
}

/// Where a message lives. Deleting needs both ids on most platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

impl MessageRef {
    pub fn new(channel_id: u64, message_id: u64) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}

/// Snapshot of an incoming chat message, stripped down to what moderation needs.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// The group the message was posted in.
    pub chat_id: u64,
    pub location: MessageRef,
    pub sender: Participant,
    /// Message text; empty for media-only messages.
    pub text: String,
    /// Chat the message was originally posted in, when it was forwarded.
    pub forward_origin_chat_id: Option<u64>,
}

/// Why a message got its sender banned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanReason {
    ForwardedFromOtherChat,
    BanWordMatch,
}

impl std::fmt::Display for BanReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BanReason::ForwardedFromOtherChat => write!(f, "Forwarded message"),
            BanReason::BanWordMatch => write!(f, "Banned word in message"),
        }
    }
}

/// Outcome of evaluating one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationDecision {
    Allow,
    Ban(BanReason),
}

/// Result of an `/addword` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddWordsSummary {
    /// Words that were not in the list before.
    pub added: Vec<String>,
    /// Words that were already present.
    pub already_present: Vec<String>,
}
