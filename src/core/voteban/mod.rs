// Core voteban module - community polls to ban a member.

pub mod voteban_models;
pub mod voteban_registry;
pub mod voteban_session;

pub use voteban_models::*;
pub use voteban_registry::*;
pub use voteban_session::*;
