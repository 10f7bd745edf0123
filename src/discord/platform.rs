// ChatPlatform implemented on top of serenity's HTTP client.
//
// chat_id is the guild id. Admin means guild owner or any role (including
// @everyone) carrying the ADMINISTRATOR permission.

use crate::core::enforcement::{ChatPlatform, MemberRole, PlatformError};
use crate::core::moderation::MessageRef;
use ::serenity::http::HttpError;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub struct DiscordPlatform {
    http: Arc<serenity::Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

/// Split serenity errors into "Discord said no" and "we couldn't reach Discord".
fn classify(err: ::serenity::Error) -> PlatformError {
    match err {
        ::serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => PlatformError::Api(
            format!("{} (HTTP {})", response.error.message, response.status_code),
        ),
        ::serenity::Error::Http(HttpError::Request(e)) => PlatformError::Transport(e.to_string()),
        ::serenity::Error::Io(e) => PlatformError::Transport(e.to_string()),
        other => PlatformError::Api(other.to_string()),
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn member_role(&self, chat_id: u64, user_id: u64) -> Result<MemberRole, PlatformError> {
        let guild_id = serenity::GuildId::new(chat_id);
        let guild = self.http.get_guild(guild_id).await.map_err(classify)?;

        if guild.owner_id.get() == user_id {
            return Ok(MemberRole::Owner);
        }

        let member = self
            .http
            .get_member(guild_id, serenity::UserId::new(user_id))
            .await
            .map_err(classify)?;

        // The @everyone role shares the guild's id.
        let everyone = serenity::RoleId::new(chat_id);
        let is_admin = member
            .roles
            .iter()
            .chain(std::iter::once(&everyone))
            .filter_map(|role_id| guild.roles.get(role_id))
            .any(|role| role.permissions.administrator());

        Ok(if is_admin {
            MemberRole::Administrator
        } else {
            MemberRole::Member
        })
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), PlatformError> {
        serenity::ChannelId::new(message.channel_id)
            .delete_message(&self.http, serenity::MessageId::new(message.message_id))
            .await
            .map_err(classify)
    }

    async fn ban_member(&self, chat_id: u64, user_id: u64) -> Result<(), PlatformError> {
        serenity::GuildId::new(chat_id)
            .ban(&self.http, serenity::UserId::new(user_id), 0)
            .await
            .map_err(classify)
    }

    async fn send_direct_message(&self, user_id: u64, text: &str) -> Result<(), PlatformError> {
        let channel = serenity::UserId::new(user_id)
            .create_dm_channel(&self.http)
            .await
            .map_err(classify)?;

        channel.say(&self.http, text).await.map_err(classify)?;
        Ok(())
    }
}
