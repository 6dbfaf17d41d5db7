use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::feed::{NotificationFeed, Toast, POLL_INTERVAL_SECS};
use crate::notifications::RecentActivity;

/// Timer-driven poll loop. Each viewer runs its own poller; there is no
/// coordination between clients and no server-side fan-out.
pub struct FeedPoller<S> {
    source: Arc<S>,
    feed: NotificationFeed,
    shutdown: watch::Receiver<bool>,
}

impl<S> FeedPoller<S>
where
    S: RecentActivity,
{
    /// The cursor starts at creation time, so only events recorded after the
    /// viewer arrives are surfaced.
    pub fn new(source: Arc<S>, shutdown: watch::Receiver<bool>) -> Self {
        Self::with_cursor(source, shutdown, Utc::now())
    }

    pub fn with_cursor(
        source: Arc<S>,
        shutdown: watch::Receiver<bool>,
        start: chrono::DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            feed: NotificationFeed::new(start),
            shutdown,
        }
    }

    /// Runs until the shutdown signal flips (or its sender is dropped),
    /// invoking `on_toast` for each newly surfaced toast. A failed poll is
    /// logged and silently retried on the next tick; the feature is cosmetic,
    /// so there is no backoff and no user-visible error.
    pub async fn run<F>(mut self, mut on_toast: F)
    where
        F: FnMut(Toast) + Send,
    {
        let mut ticker = interval(Duration::from_secs(POLL_INTERVAL_SECS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.source.fetch_recent().await {
                        Ok(events) => {
                            if *self.shutdown.borrow() {
                                // Response landed after teardown; discard it.
                                break;
                            }
                            for toast in self.feed.reconcile(&events, Utc::now()) {
                                on_toast(toast);
                            }
                        }
                        Err(e) => {
                            error!("activity feed poll failed: {}", e);
                        }
                    }
                }
                _ = self.shutdown.changed() => {
                    info!("activity feed poller shutting down");
                    break;
                }
            }
        }
    }
}
