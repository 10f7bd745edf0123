// Discord side of automatic moderation: word-list commands and the
// message handler.

pub mod commands;
pub mod message_handler;
