// The moderation decision: one pure function, no I/O.
//
// Order is fixed: admin exemption, then foreign forward, then banned words.
// The first rule that fires wins and is the only reason reported.

use super::ban_words::contains_ban_word;
use super::forward_detector::is_foreign_forward;
use super::moderation_models::{BanReason, IncomingMessage, ModerationDecision};

/// Decide what to do with a message.
///
/// # Arguments
/// * `message` - The message to judge
/// * `is_sender_admin` - Whether the author administers the chat
/// * `words` - Current banned-word list, freshly read from the store
pub fn evaluate<S: AsRef<str>>(
    message: &IncomingMessage,
    is_sender_admin: bool,
    words: &[S],
) -> ModerationDecision {
    if is_sender_admin {
        return ModerationDecision::Allow;
    }

    if is_foreign_forward(message, message.chat_id) {
        return ModerationDecision::Ban(BanReason::ForwardedFromOtherChat);
    }

    if contains_ban_word(&message.text, words) {
        return ModerationDecision::Ban(BanReason::BanWordMatch);
    }

    ModerationDecision::Allow
}
