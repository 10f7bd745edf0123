// Button presses on voteban polls.

use super::poll_render::{parse_vote, poll_buttons, poll_content};
use crate::core::voteban::VoteOutcome;
use crate::discord::{participant, Data, Error};
use poise::serenity_prelude as serenity;

pub async fn handle_component(
    ctx: &serenity::Context,
    data: &Data,
    component: &serenity::ComponentInteraction,
) -> Result<(), Error> {
    // Not one of our buttons
    let wants_ban = match parse_vote(&component.data.custom_id) {
        Some(v) => v,
        None => return Ok(()),
    };

    let poll_id = component.message.id.get();
    let voter = participant(&component.user);

    // The redraw happens inside the session lock so concurrent votes update
    // the poll message in the order they were counted.
    let cast = data
        .votebans
        .cast_vote(poll_id, voter, wants_ban, |outcome| async move {
            match outcome {
                VoteOutcome::Pending(view) => component
                    .create_response(
                        &ctx.http,
                        serenity::CreateInteractionResponse::UpdateMessage(
                            serenity::CreateInteractionResponseMessage::new()
                                .content(poll_content(&view))
                                .components(poll_buttons(&view)),
                        ),
                    )
                    .await
                    .map(|()| None),
                VoteOutcome::Resolved(resolution) => Ok(Some(resolution)),
            }
        })
        .await;

    match cast {
        Ok(Ok(None)) => {}
        Ok(Ok(Some(resolution))) => {
            // The poll message is about to be deleted, so just acknowledge.
            if let Err(e) = component
                .create_response(&ctx.http, serenity::CreateInteractionResponse::Acknowledge)
                .await
            {
                tracing::warn!("Failed to acknowledge resolving vote on poll {}: {}", poll_id, e);
            }
            data.enforcer.resolve(&resolution).await;
        }
        Ok(Err(e)) => return Err(e.into()),
        Err(e) => {
            component
                .create_response(
                    &ctx.http,
                    serenity::CreateInteractionResponse::Message(
                        serenity::CreateInteractionResponseMessage::new()
                            .content(e.to_string())
                            .ephemeral(true),
                    ),
                )
                .await?;
        }
    }

    Ok(())
}
