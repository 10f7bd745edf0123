// This is the entry point of the moderation bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (databases)
// - `discord/` = Discord-specific adapters (commands, events, ChatPlatform)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::config::BotConfig;
use crate::core::enforcement::{AuditLog, Enforcer};
use crate::core::moderation::ModerationService;
use crate::core::voteban::VotebanRegistry;
use crate::discord::moderation::message_handler;
use crate::discord::voteban::interactions as voteban_interactions;
use crate::discord::{Data, DiscordPlatform, Error};
use crate::infra::moderation::SqliteWordStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
///
/// Messages go through automatic moderation; button presses are voteban votes.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            if let Err(e) = message_handler::handle_message(data, new_message).await {
                tracing::error!(
                    message_id = new_message.id.get(),
                    "Error moderating message: {}",
                    e
                );
            }
        }
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(component),
        } => {
            if let Err(e) = voteban_interactions::handle_component(ctx, data, component).await {
                tracing::error!("Error handling voteban button: {}", e);
            }
        }
        _ => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = Arc::new(BotConfig::from_env()?);
    if config.admin_ids.is_empty() {
        tracing::warn!(
            "ADMIN_IDS is empty: audit messages only go to the console and nobody can manage the word list"
        );
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Services that don't need the Discord HTTP client are built here; the
    // enforcer is built in `setup` once serenity hands us one.

    let word_store = SqliteWordStore::open(&config.database_path).await?;
    let moderation = Arc::new(ModerationService::new(word_store));

    // Vote state is in-memory only and starts empty on every run.
    let votebans = Arc::new(VotebanRegistry::new());

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS;

    let token = config.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                discord::moderation::commands::addword(),
                discord::moderation::commands::listwords(),
                discord::moderation::commands::removeword(),
                discord::voteban::commands::voteban(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is starting up...");

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Commands registered");

                let platform = Arc::new(DiscordPlatform::new(ctx.http.clone()));
                let audit = Arc::new(AuditLog::new(
                    Arc::clone(&platform),
                    config.admin_ids.clone(),
                ));
                let enforcer = Arc::new(Enforcer::new(platform, audit));

                enforcer.audit().record("Bot started successfully!").await;

                Ok(Data {
                    config,
                    moderation,
                    votebans,
                    enforcer,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await?;
    Ok(())
}
