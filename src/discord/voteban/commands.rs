// The "Voteban" message context-menu command.

use super::poll_render::{poll_buttons, poll_content};
use crate::core::moderation::MessageRef;
use crate::core::voteban::{PollView, VotebanRequest, VotebanSession};
use crate::discord::{participant, reply_private, Context, Error};
use poise::serenity_prelude as serenity;

/// Start a vote to ban the author of this message.
#[poise::command(context_menu_command = "Voteban", guild_only)]
pub async fn voteban(
    ctx: Context<'_>,
    msg: serenity::Message,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?.get();
    let data = ctx.data();

    // Role lookup, the poll post and the audit DMs can outrun the interaction
    // deadline.
    ctx.defer_ephemeral().await?;

    let initiator = participant(ctx.author());
    let target = participant(&msg.author);

    // Only pay for the role lookup when the cheaper checks pass.
    let target_is_admin = if target.id == initiator.id || msg.author.bot {
        false
    } else {
        data.enforcer.is_admin(guild_id, target.id).await
    };

    let request = VotebanRequest {
        chat_id: guild_id,
        initiator,
        target,
        target_message: MessageRef::new(msg.channel_id.get(), msg.id.get()),
        target_is_admin,
        target_is_bot: msg.author.bot,
    };

    if let Err(e) = request.validate() {
        return reply_private(ctx, e.to_string()).await;
    }

    let threshold = data.config.voteban_threshold;
    let opened_at = chrono::Utc::now();
    let view = PollView::opening(&request, threshold, opened_at);

    let poll = msg
        .channel_id
        .send_message(
            &ctx.serenity_context().http,
            serenity::CreateMessage::new()
                .content(poll_content(&view))
                .components(poll_buttons(&view))
                .reference_message(&msg),
        )
        .await?;

    let initiator_label = request.initiator.label().to_string();
    let target_label = request.target.label().to_string();
    let target_id = request.target.id;

    let session = VotebanSession::open(
        request,
        MessageRef::new(poll.channel_id.get(), poll.id.get()),
        threshold,
        opened_at,
    )?;
    data.votebans.create(session)?;

    tracing::info!(poll_id = poll.id.get(), target_id, "Voteban opened");
    reply_private(ctx, "Voteban started.").await?;

    data.enforcer
        .audit()
        .record(&format!(
            "@{} started a voteban against @{} ({}).",
            initiator_label, target_label, target_id
        ))
        .await;

    Ok(())
}
