// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "config/bot_config.rs"]
pub mod config;

#[path = "enforcement/mod.rs"]
pub mod enforcement;

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "voteban/mod.rs"]
pub mod voteban;
