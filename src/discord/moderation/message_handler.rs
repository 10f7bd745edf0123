// Automatic moderation of incoming guild messages.
//
// Extract primitive data from the serenity message, ask the core for a
// decision, hand the decision to the enforcer.

use crate::core::moderation::{IncomingMessage, MessageRef};
use crate::discord::{participant, Data, Error};
use poise::serenity_prelude as serenity;

pub async fn handle_message(data: &Data, msg: &serenity::Message) -> Result<(), Error> {
    // Ignore bots (including ourselves) and DMs
    if msg.author.bot {
        return Ok(());
    }
    let guild_id = match msg.guild_id {
        Some(id) => id.get(),
        None => return Ok(()),
    };

    let incoming = to_incoming(guild_id, msg);

    if data.enforcer.exempt_admin(&incoming).await {
        return Ok(());
    }

    let decision = data.moderation.check_message(&incoming, false).await?;
    data.enforcer.enforce(&incoming, decision).await;

    Ok(())
}

fn to_incoming(guild_id: u64, msg: &serenity::Message) -> IncomingMessage {
    IncomingMessage {
        chat_id: guild_id,
        location: MessageRef::new(msg.channel_id.get(), msg.id.get()),
        sender: participant(&msg.author),
        text: msg.content.clone(),
        forward_origin_chat_id: forward_origin(
            guild_id,
            msg.channel_id,
            msg.message_reference.as_ref(),
        ),
    }
}

/// The guild a referenced message came from.
///
/// Replies and forwards both carry a message reference. When Discord leaves
/// out the guild id we fall back to the channel: same channel means same
/// guild, anything else is reported by its channel id.
fn forward_origin(
    guild_id: u64,
    channel_id: serenity::ChannelId,
    reference: Option<&serenity::MessageReference>,
) -> Option<u64> {
    let reference = reference?;
    Some(match reference.guild_id {
        Some(origin) => origin.get(),
        None if reference.channel_id == channel_id => guild_id,
        None => reference.channel_id.get(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::forward_detector::is_foreign_forward;
    use crate::core::moderation::Participant;

    const GUILD: u64 = 100;
    const CHANNEL: u64 = 10;

    fn reference(channel_id: u64, guild_id: Option<u64>) -> serenity::MessageReference {
        let mut reference = serenity::MessageReference::from((
            serenity::ChannelId::new(channel_id),
            serenity::MessageId::new(1),
        ));
        reference.guild_id = guild_id.map(serenity::GuildId::new);
        reference
    }

    fn flagged(origin: Option<u64>) -> bool {
        let message = IncomingMessage {
            chat_id: GUILD,
            location: MessageRef::new(CHANNEL, 2),
            sender: Participant::new(7, None),
            text: String::new(),
            forward_origin_chat_id: origin,
        };
        is_foreign_forward(&message, GUILD)
    }

    fn origin_of(reference: Option<&serenity::MessageReference>) -> Option<u64> {
        forward_origin(GUILD, serenity::ChannelId::new(CHANNEL), reference)
    }

    #[test]
    fn test_no_reference_has_no_origin() {
        assert_eq!(origin_of(None), None);
    }

    #[test]
    fn test_reply_in_same_guild_is_not_flagged() {
        let origin = origin_of(Some(&reference(11, Some(GUILD))));
        assert_eq!(origin, Some(GUILD));
        assert!(!flagged(origin));
    }

    #[test]
    fn test_forward_from_other_guild_is_flagged() {
        let origin = origin_of(Some(&reference(555, Some(200))));
        assert_eq!(origin, Some(200));
        assert!(flagged(origin));
    }

    #[test]
    fn test_missing_guild_same_channel_counts_as_this_guild() {
        let origin = origin_of(Some(&reference(CHANNEL, None)));
        assert_eq!(origin, Some(GUILD));
        assert!(!flagged(origin));
    }

    #[test]
    fn test_missing_guild_other_channel_reports_channel() {
        let origin = origin_of(Some(&reference(555, None)));
        assert_eq!(origin, Some(555));
        assert!(flagged(origin));
    }
}
