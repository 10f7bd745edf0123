use super::moderation_models::IncomingMessage;

/// True iff the message was forwarded from a chat other than `current_chat_id`.
///
/// Forwards from elsewhere in the same chat are fine.
pub fn is_foreign_forward(message: &IncomingMessage, current_chat_id: u64) -> bool {
    matches!(message.forward_origin_chat_id, Some(origin) if origin != current_chat_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::{MessageRef, Participant};

    fn message(origin: Option<u64>) -> IncomingMessage {
        IncomingMessage {
            chat_id: 100,
            location: MessageRef::new(10, 1),
            sender: Participant::new(7, None),
            text: String::new(),
            forward_origin_chat_id: origin,
        }
    }

    #[test]
    fn test_forward_from_other_chat_is_flagged() {
        assert!(is_foreign_forward(&message(Some(200)), 100));
    }

    #[test]
    fn test_forward_from_same_chat_is_not_flagged() {
        assert!(!is_foreign_forward(&message(Some(100)), 100));
    }

    #[test]
    fn test_plain_message_is_not_flagged() {
        assert!(!is_foreign_forward(&message(None), 100));
    }
}
