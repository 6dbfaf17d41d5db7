use chrono::{DateTime, Duration, Utc};

use crate::notifications::JoinNotification;

/// Poll cadence of the feed.
pub const POLL_INTERVAL_SECS: u64 = 3;

/// How long a surfaced toast stays visible, independent of polling.
pub const TOAST_LIFETIME_SECS: i64 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Display identifier, taken from the join event's id.
    pub id: String,
    pub message: String,
    pub visible_until: DateTime<Utc>,
}

/// Timestamp-cursor reconciliation over the fetched window.
///
/// The cursor is the only de-duplication mechanism: an event surfaces at most
/// once per feed lifetime because later polls see its `joined_at` at or below
/// `last_checked_at`. The cursor always advances to the poll's wall-clock
/// time, so an event whose timestamp lags the cursor (clock skew) is skipped,
/// not surfaced late.
#[derive(Debug)]
pub struct NotificationFeed {
    last_checked_at: DateTime<Utc>,
    toasts: Vec<Toast>,
}

impl NotificationFeed {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            last_checked_at: start,
            toasts: Vec::new(),
        }
    }

    /// One reconciliation pass. Returns the newly surfaced toasts in
    /// ascending `joined_at` order.
    pub fn reconcile(&mut self, fetched: &[JoinNotification], now: DateTime<Utc>) -> Vec<Toast> {
        self.prune_expired(now);

        let mut fresh: Vec<&JoinNotification> = fetched
            .iter()
            .filter(|n| n.joined_at > self.last_checked_at)
            .collect();
        fresh.sort_by_key(|n| n.joined_at);

        let surfaced: Vec<Toast> = fresh
            .into_iter()
            .map(|n| Toast {
                id: n.id.clone(),
                message: format!(
                    "{} just joined the shipment for {}",
                    n.display_name, n.product_name
                ),
                visible_until: now + Duration::seconds(TOAST_LIFETIME_SECS),
            })
            .collect();
        self.toasts.extend(surfaced.iter().cloned());

        // Advance to wall-clock time, not the newest event's timestamp,
        // even when nothing surfaced.
        self.last_checked_at = now;

        surfaced
    }

    /// Drops toasts whose display window has passed.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|t| t.visible_until > now);
    }

    /// Toasts still visible at `now`.
    pub fn active_toasts(&self, now: DateTime<Utc>) -> Vec<&Toast> {
        self.toasts
            .iter()
            .filter(|t| t.visible_until > now)
            .collect()
    }

    pub fn last_checked_at(&self) -> DateTime<Utc> {
        self.last_checked_at
    }
}
