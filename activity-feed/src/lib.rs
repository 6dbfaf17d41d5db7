//! Client-side "so-and-so just joined" feed: a timer-driven poll of the
//! storefront's recent-activity endpoint, reconciled against a local
//! timestamp cursor into short-lived toasts.

pub mod feed;
pub mod notifications;
pub mod poller;

pub use feed::{NotificationFeed, Toast, POLL_INTERVAL_SECS, TOAST_LIFETIME_SECS};
pub use notifications::{FetchError, HttpActivitySource, JoinNotification, RecentActivity};
pub use poller::FeedPoller;
