//! # Failure Notifications
//!
//! When every delivery attempt is exhausted the user has a silent printer
//! and no browser tab waiting on the response, so the service posts a
//! Home Assistant persistent notification through the Supervisor API.
//! Notification delivery is best effort and fire-and-forget.

use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use serde_json::json;

use crate::error::PaginitaError;

/// Supervisor endpoint for `persistent_notification.create`.
const SUPERVISOR_NOTIFY_URL: &str =
    "http://supervisor/core/api/services/persistent_notification/create";

/// Stable id so repeated failures update one card instead of stacking.
const NOTIFICATION_ID: &str = "paginita_print_error";

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Somewhere to report a permanently failed print.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, title: &str, message: &str) -> Result<(), PaginitaError>;
}

/// Posts persistent notifications through the Home Assistant Supervisor.
pub struct SupervisorNotifier {
    client: reqwest::Client,
    token: String,
}

impl SupervisorNotifier {
    /// Build from the `SUPERVISOR_TOKEN` environment variable. Returns
    /// `None` outside a supervised install; callers fall back to
    /// [`LogOnlySink`].
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("SUPERVISOR_TOKEN").ok()?;
        if token.is_empty() {
            return None;
        }
        let client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .ok()?;
        Some(Self { client, token })
    }
}

#[async_trait]
impl NotificationSink for SupervisorNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), PaginitaError> {
        let body = json!({
            "title": title,
            "message": message,
            "notification_id": NOTIFICATION_ID,
        });

        self.client
            .post(SUPERVISOR_NOTIFY_URL)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| PaginitaError::Transport(format!("notification post failed: {}", e)))?;

        info!("posted failure notification: {}", title);
        Ok(())
    }
}

/// Sink used when no Supervisor is available: the failure still lands in
/// the service log.
pub struct LogOnlySink;

#[async_trait]
impl NotificationSink for LogOnlySink {
    async fn notify(&self, title: &str, message: &str) -> Result<(), PaginitaError> {
        warn!("{}: {}", title, message);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
