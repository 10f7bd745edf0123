// Core moderation module - banned words, forward detection and the
// per-message decision.

pub mod ban_words;
pub mod forward_detector;
pub mod moderation_models;
pub mod moderation_policy;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
