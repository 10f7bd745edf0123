// Enforcer - turns moderation decisions and voteban verdicts into platform calls.
//
// Each call is independent: a failed delete does not stop the ban and vice
// versa. Failures are audited once and abandoned, there is no retry.

use super::audit_log::AuditLog;
use super::platform::ChatPlatform;
use crate::core::moderation::{IncomingMessage, MessageRef, ModerationDecision};
use crate::core::voteban::{Resolution, Verdict};
use std::sync::Arc;

pub struct Enforcer<P: ChatPlatform> {
    platform: Arc<P>,
    audit: Arc<AuditLog<P>>,
}

impl<P: ChatPlatform> Enforcer<P> {
    pub fn new(platform: Arc<P>, audit: Arc<AuditLog<P>>) -> Self {
        Self { platform, audit }
    }

    pub fn audit(&self) -> &AuditLog<P> {
        &self.audit
    }

    /// Whether `user_id` administers `chat_id`.
    ///
    /// A failed lookup is audited and treated as "not an admin".
    pub async fn is_admin(&self, chat_id: u64, user_id: u64) -> bool {
        match self.platform.member_role(chat_id, user_id).await {
            Ok(role) => role.is_admin(),
            Err(e) => {
                self.audit
                    .record_failure(&format!("Could not check rights of user {}", user_id), &e)
                    .await;
                false
            }
        }
    }

    /// Whether the sender of `message` is exempt from automatic moderation.
    ///
    /// Admins are never acted on, but the exemption still goes to the audit log.
    pub async fn exempt_admin(&self, message: &IncomingMessage) -> bool {
        let sender = &message.sender;
        if !self.is_admin(message.chat_id, sender.id).await {
            return false;
        }
        self.audit
            .record(&format!(
                "@{} ({}) is an administrator, no action taken.",
                sender.label(),
                sender.id
            ))
            .await;
        true
    }

    /// Ban a member. Returns whether the platform accepted it.
    pub async fn ban(&self, chat_id: u64, user_id: u64) -> bool {
        match self.platform.ban_member(chat_id, user_id).await {
            Ok(()) => {
                self.audit.record(&format!("User {} banned.", user_id)).await;
                true
            }
            Err(e) => {
                self.audit
                    .record_failure(&format!("Could not ban user {}", user_id), &e)
                    .await;
                false
            }
        }
    }

    /// Delete a message. Returns whether the platform accepted it.
    pub async fn delete_message(&self, message: MessageRef) -> bool {
        match self.platform.delete_message(message).await {
            Ok(()) => true,
            Err(e) => {
                self.audit
                    .record_failure(
                        &format!(
                            "Could not delete message {} in channel {}",
                            message.message_id, message.channel_id
                        ),
                        &e,
                    )
                    .await;
                false
            }
        }
    }

    /// Apply an automatic moderation decision to the message it was made for.
    pub async fn enforce(&self, message: &IncomingMessage, decision: ModerationDecision) {
        let reason = match decision {
            ModerationDecision::Allow => return,
            ModerationDecision::Ban(reason) => reason,
        };

        let sender = &message.sender;
        self.audit
            .record(&format!(
                "{} from @{} ({}). Banning.",
                reason,
                sender.label(),
                sender.id
            ))
            .await;

        self.delete_message(message.location).await;
        self.ban(message.chat_id, sender.id).await;
    }

    /// Carry out a voteban verdict.
    ///
    /// The session is already out of the registry by the time we get here,
    /// so nothing below can leave it dangling.
    pub async fn resolve(&self, resolution: &Resolution) {
        let target = &resolution.target;
        match resolution.verdict {
            Verdict::Ban => {
                self.audit
                    .record(&format!(
                        "Voteban against @{} ({}) passed with {} votes for ({}). Banning.",
                        target.label(),
                        target.id,
                        resolution.tally.ban_count(),
                        resolution.tally.ban_voters.join(", ")
                    ))
                    .await;

                self.delete_message(resolution.target_message).await;
                self.ban(resolution.chat_id, target.id).await;
                self.delete_message(resolution.poll_message).await;
            }
            Verdict::Dismiss => {
                self.audit
                    .record(&format!(
                        "Voteban against @{} ({}) dismissed with {} votes against ({}).",
                        target.label(),
                        target.id,
                        resolution.tally.keep_count(),
                        resolution.tally.keep_voters.join(", ")
                    ))
                    .await;

                self.delete_message(resolution.poll_message).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enforcement::mock::{Call, MockPlatform};
    use crate::core::enforcement::PlatformError;
    use crate::core::moderation::{BanReason, Participant};
    use crate::core::voteban::VoteTally;

    const ADMIN: u64 = 1;

    fn enforcer(platform: MockPlatform) -> (Arc<MockPlatform>, Enforcer<MockPlatform>) {
        let platform = Arc::new(platform);
        let audit = Arc::new(AuditLog::new(Arc::clone(&platform), vec![ADMIN]));
        (Arc::clone(&platform), Enforcer::new(platform, audit))
    }

    fn message() -> IncomingMessage {
        IncomingMessage {
            chat_id: 100,
            location: MessageRef::new(10, 11),
            sender: Participant::new(7, Some("mallory".to_string())),
            text: "buy now".to_string(),
            forward_origin_chat_id: None,
        }
    }

    fn resolution(verdict: Verdict) -> Resolution {
        Resolution {
            poll_id: 99,
            chat_id: 100,
            poll_message: MessageRef::new(10, 99),
            target: Participant::new(7, Some("mallory".to_string())),
            target_message: MessageRef::new(10, 50),
            verdict,
            tally: VoteTally {
                threshold: 2,
                ban_voters: vec!["a".into(), "b".into()],
                keep_voters: Vec::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_allow_does_nothing() {
        let (platform, enforcer) = enforcer(MockPlatform::default());

        enforcer.enforce(&message(), ModerationDecision::Allow).await;

        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ban_deletes_and_bans() {
        let (platform, enforcer) = enforcer(MockPlatform::default());

        enforcer
            .enforce(&message(), ModerationDecision::Ban(BanReason::BanWordMatch))
            .await;

        assert_eq!(
            platform.actions(),
            vec![
                Call::Delete(MessageRef::new(10, 11)),
                Call::Ban {
                    chat_id: 100,
                    user_id: 7
                },
            ]
        );
        assert_eq!(
            platform.dms_to(ADMIN),
            vec![
                "Banned word in message from @mallory (7). Banning.",
                "User 7 banned.",
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_still_bans() {
        let (platform, enforcer) = enforcer(MockPlatform {
            fail_delete: Some(PlatformError::Api("Unknown Message".into())),
            ..Default::default()
        });

        enforcer
            .enforce(
                &message(),
                ModerationDecision::Ban(BanReason::ForwardedFromOtherChat),
            )
            .await;

        assert!(platform.actions().contains(&Call::Ban {
            chat_id: 100,
            user_id: 7
        }));
        let dms = platform.dms_to(ADMIN);
        assert_eq!(dms[0], "Forwarded message from @mallory (7). Banning.");
        assert!(dms.iter().any(|d| d.contains("API error: Unknown Message")));
        assert!(dms.iter().any(|d| d == "User 7 banned."));
    }

    #[tokio::test]
    async fn test_failed_ban_is_reported_as_network_error() {
        let (platform, enforcer) = enforcer(MockPlatform {
            fail_ban: Some(PlatformError::Transport("connection reset".into())),
            ..Default::default()
        });

        assert!(!enforcer.ban(100, 7).await);
        assert_eq!(
            platform.dms_to(ADMIN),
            vec!["Could not ban user 7. Network error: connection reset"]
        );
    }

    #[tokio::test]
    async fn test_resolve_ban() {
        let (platform, enforcer) = enforcer(MockPlatform::default());

        enforcer.resolve(&resolution(Verdict::Ban)).await;

        assert_eq!(
            platform.actions(),
            vec![
                Call::Delete(MessageRef::new(10, 50)),
                Call::Ban {
                    chat_id: 100,
                    user_id: 7
                },
                Call::Delete(MessageRef::new(10, 99)),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_dismiss_only_removes_poll() {
        let (platform, enforcer) = enforcer(MockPlatform::default());

        enforcer.resolve(&resolution(Verdict::Dismiss)).await;

        assert_eq!(
            platform.actions(),
            vec![Call::Delete(MessageRef::new(10, 99))]
        );
    }

    #[tokio::test]
    async fn test_resolve_ban_survives_every_failure() {
        let (platform, enforcer) = enforcer(MockPlatform {
            fail_delete: Some(PlatformError::Api("Missing Permissions".into())),
            fail_ban: Some(PlatformError::Api("Missing Permissions".into())),
            ..Default::default()
        });

        enforcer.resolve(&resolution(Verdict::Ban)).await;

        // All three calls were still attempted.
        assert_eq!(platform.actions().len(), 3);
        let failures = platform
            .dms_to(ADMIN)
            .into_iter()
            .filter(|d| d.contains("API error"))
            .count();
        assert_eq!(failures, 3);
    }

    #[tokio::test]
    async fn test_role_lookup_failure_means_not_admin() {
        let (platform, enforcer) = enforcer(MockPlatform {
            admins: [7].into_iter().collect(),
            fail_role_lookup: Some(PlatformError::Transport("timeout".into())),
            ..Default::default()
        });

        assert!(!enforcer.is_admin(100, 7).await);
        assert_eq!(
            platform.dms_to(ADMIN),
            vec!["Could not check rights of user 7. Network error: timeout"]
        );
    }

    #[tokio::test]
    async fn test_admin_exemption_is_audited() {
        let (platform, enforcer) = enforcer(MockPlatform {
            admins: [7].into_iter().collect(),
            ..Default::default()
        });

        assert!(enforcer.exempt_admin(&message()).await);
        assert!(platform.actions().is_empty());
        assert_eq!(
            platform.dms_to(ADMIN),
            vec!["@mallory (7) is an administrator, no action taken."]
        );
    }

    #[tokio::test]
    async fn test_regular_member_is_not_exempt() {
        let (platform, enforcer) = enforcer(MockPlatform::default());

        assert!(!enforcer.exempt_admin(&message()).await);
        assert!(platform.dms_to(ADMIN).is_empty());
    }

    #[tokio::test]
    async fn test_admin_lookup() {
        let (_platform, enforcer) = enforcer(MockPlatform {
            admins: [7].into_iter().collect(),
            ..Default::default()
        });

        assert!(enforcer.is_admin(100, 7).await);
        assert!(!enforcer.is_admin(100, 8).await);
    }
}
