use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::error;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// One entry from the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinNotification {
    pub id: String,
    pub display_name: String,
    pub product_name: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("feed request failed: {0}")]
    Request(String),

    #[error("feed endpoint returned status {0}")]
    Status(u16),

    #[error("failed to parse feed response: {0}")]
    Parse(String),
}

/// Source of recent join events. The poller only depends on this trait, so
/// tests can script the feed.
#[async_trait]
pub trait RecentActivity: Send + Sync {
    async fn fetch_recent(&self) -> Result<Vec<JoinNotification>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct NotificationsEnvelope {
    #[serde(default)]
    notifications: Vec<JoinNotification>,
}

/// Fetches the trailing window from `GET {base}/notifications`. The window
/// and cap are fixed server-side, independent of any client's cursor.
pub struct HttpActivitySource {
    client: Client,
    endpoint: String,
}

impl HttpActivitySource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/notifications", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RecentActivity for HttpActivitySource {
    async fn fetch_recent(&self) -> Result<Vec<JoinNotification>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: NotificationsEnvelope = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(envelope.notifications)
    }
}
