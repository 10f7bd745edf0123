// Admin audit channel.
//
// Every enforcement action and error is written to tracing and sent as a DM
// to each configured admin. A DM that fails is only logged locally.

use super::platform::{ChatPlatform, PlatformError};
use std::sync::Arc;

pub struct AuditLog<P: ChatPlatform> {
    platform: Arc<P>,
    admin_ids: Vec<u64>,
}

impl<P: ChatPlatform> AuditLog<P> {
    pub fn new(platform: Arc<P>, admin_ids: Vec<u64>) -> Self {
        Self {
            platform,
            admin_ids,
        }
    }

    pub async fn record(&self, text: &str) {
        tracing::info!(target: "audit", "{}", text);
        self.broadcast(text).await;
    }

    /// Record a failed platform call, labelled by failure kind.
    pub async fn record_failure(&self, action: &str, err: &PlatformError) {
        tracing::error!(target: "audit", kind = err.label(), "{}: {}", action, err);
        self.broadcast(&format!("{}. {}", action, err)).await;
    }

    async fn broadcast(&self, text: &str) {
        for admin_id in &self.admin_ids {
            if let Err(e) = self.platform.send_direct_message(*admin_id, text).await {
                tracing::error!("Failed to send audit message to admin {}: {}", admin_id, e);
            }
        }
    }
}
