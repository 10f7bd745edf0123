// The chat platform as seen by the core.
//
// The Discord layer implements this; tests use a recording mock.

use crate::core::moderation::MessageRef;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform understood the request and refused it (missing rights, unknown message...).
    #[error("API error: {0}")]
    Api(String),

    /// We never got a proper answer (connection, timeout, TLS...).
    #[error("Network error: {0}")]
    Transport(String),
}

impl PlatformError {
    /// Short label used in audit lines so API and network failures can be told apart.
    pub fn label(&self) -> &'static str {
        match self {
            PlatformError::Api(_) => "API error",
            PlatformError::Transport(_) => "Network error",
        }
    }
}

/// A member's standing in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Owner,
    Administrator,
    Member,
}

impl MemberRole {
    pub fn is_admin(self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Administrator)
    }
}

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn member_role(&self, chat_id: u64, user_id: u64) -> Result<MemberRole, PlatformError>;

    async fn delete_message(&self, message: MessageRef) -> Result<(), PlatformError>;

    async fn ban_member(&self, chat_id: u64, user_id: u64) -> Result<(), PlatformError>;

    async fn send_direct_message(&self, user_id: u64, text: &str) -> Result<(), PlatformError>;
}
