// Banned-word slash commands. Restricted to the ids in ADMIN_IDS.

use crate::core::moderation::ModerationError;
use crate::discord::{reply_private, Context, Error};

/// Add banned words (separate them with spaces, commas or semicolons).
#[poise::command(slash_command)]
pub async fn addword(
    ctx: Context<'_>,
    #[description = "Words to ban"] words: String,
) -> Result<(), Error> {
    if !ctx.data().config.is_bot_admin(ctx.author().id.get()) {
        return reply_private(ctx, "Only administrators can add words.").await;
    }

    let summary = match ctx.data().moderation.add_words(&words).await {
        Ok(summary) => summary,
        Err(ModerationError::EmptyWordList) => {
            return reply_private(ctx, "Please give at least one word after /addword.").await;
        }
        Err(e) => return Err(e.into()),
    };

    if summary.added.is_empty() {
        return reply_private(
            ctx,
            "No new words were added (they may all be on the list already).",
        )
        .await;
    }

    let count = summary.added.len();
    let noun = if count == 1 { "new word" } else { "new words" };
    reply_private(ctx, format!("Added {} {}.", count, noun)).await?;

    ctx.data()
        .enforcer
        .audit()
        .record(&format!(
            "@{}: added {} {}: {}",
            ctx.author().name,
            count,
            noun,
            summary.added.join(", ")
        ))
        .await;

    Ok(())
}

/// Show the banned-word list.
#[poise::command(slash_command)]
pub async fn listwords(ctx: Context<'_>) -> Result<(), Error> {
    if !ctx.data().config.is_bot_admin(ctx.author().id.get()) {
        return reply_private(ctx, "Only administrators can view the word list.").await;
    }

    let words = ctx.data().moderation.list_words().await?;
    if words.is_empty() {
        return reply_private(ctx, "The word list is empty.").await;
    }

    reply_private(ctx, format!("Banned words: {}", words.join(", "))).await
}

/// Remove a word from the banned-word list.
#[poise::command(slash_command)]
pub async fn removeword(
    ctx: Context<'_>,
    #[description = "Word to remove"] word: String,
) -> Result<(), Error> {
    if !ctx.data().config.is_bot_admin(ctx.author().id.get()) {
        return reply_private(ctx, "Only administrators can remove words.").await;
    }

    match ctx.data().moderation.remove_word(&word).await {
        Ok(removed) => {
            reply_private(ctx, format!("Word \"{}\" removed from the list.", removed)).await?;
            ctx.data()
                .enforcer
                .audit()
                .record(&format!(
                    "@{}: removed word {} from the list.",
                    ctx.author().name,
                    removed
                ))
                .await;
            Ok(())
        }
        Err(ModerationError::WordNotFound(missing)) => {
            reply_private(ctx, format!("Word \"{}\" not found.", missing)).await
        }
        Err(ModerationError::EmptyWordList) => {
            reply_private(ctx, "Please give a word after /removeword.").await
        }
        Err(e) => Err(e.into()),
    }
}
