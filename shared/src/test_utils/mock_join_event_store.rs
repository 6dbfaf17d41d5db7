use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::JoinEvent;
use crate::store::{JoinEventStore, StoreResult};

/// In-memory join-event store. Insertion order is deliberately not what
/// `recent_joins` returns; the trait contract sorts by `joined_at`.
#[derive(Default)]
pub struct MockJoinEventStore {
    events: RwLock<Vec<JoinEvent>>,
}

impl MockJoinEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all_events(&self) -> Vec<JoinEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl JoinEventStore for MockJoinEventStore {
    async fn record_join(&self, event: JoinEvent) -> StoreResult<JoinEvent> {
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn recent_joins(&self, since: DateTime<Utc>, limit: usize) -> StoreResult<Vec<JoinEvent>> {
        let mut events: Vec<JoinEvent> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.joined_at_time().map(|t| t >= since).unwrap_or(false))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        events.truncate(limit);
        Ok(events)
    }
}
