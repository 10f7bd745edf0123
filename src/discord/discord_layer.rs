// Discord layer - commands, event handlers and the ChatPlatform adapter.
//
// This layer is THIN: pull ids and text out of serenity types, call the
// core, and turn the result into Discord replies.

use crate::core::config::BotConfig;
use crate::core::enforcement::Enforcer;
use crate::core::moderation::{ModerationService, Participant};
use crate::core::voteban::VotebanRegistry;
use crate::infra::moderation::SqliteWordStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

#[path = "moderation/mod.rs"]
pub mod moderation;

pub mod platform;

#[path = "voteban/mod.rs"]
pub mod voteban;

pub use platform::DiscordPlatform;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command and event.
pub struct Data {
    pub config: Arc<BotConfig>,
    pub moderation: Arc<ModerationService<SqliteWordStore>>,
    pub votebans: Arc<VotebanRegistry>,
    pub enforcer: Arc<Enforcer<DiscordPlatform>>,
}

/// Convert a Discord user into a core participant.
pub fn participant(user: &serenity::User) -> Participant {
    let display_name = user
        .global_name
        .clone()
        .or_else(|| (!user.name.is_empty()).then(|| user.name.clone()));
    Participant::new(user.id.get(), display_name)
}

/// Send a reply only the invoking user can see.
pub async fn reply_private(ctx: Context<'_>, text: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(text.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
