use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use log::info;
use pinkcart_shared::models::JoinEvent;
use pinkcart_shared::store::JoinEventStore;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::handlers::no_store_headers;
use crate::models::{CustomerResponse, NotificationResponse, RecordJoinRequest};

/// Lookback for the polling feed: a fixed trailing window, independent of any
/// client's cursor.
const NOTIFICATION_WINDOW_MINUTES: i64 = 5;
const NOTIFICATION_LIMIT: usize = 10;

const CUSTOMER_WINDOW_HOURS: i64 = 24;
const CUSTOMER_LIMIT: usize = 50;

// POST /customers
pub async fn record_join<S>(
    State(store): State<Arc<S>>,
    Json(payload): Json<RecordJoinRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)>
where
    S: JoinEventStore,
{
    let display_name = payload.display_name.trim();
    if display_name.is_empty() || payload.product_id.is_empty() || payload.product_name.is_empty() {
        return Err(AppError::bad_request("Missing required fields".to_string()));
    }

    // No catalog lookup here: the product name is a snapshot and the id is an
    // unvalidated reference.
    let event = JoinEvent::new(display_name, &payload.product_id, &payload.product_name);
    let stored = store.record_join(event).await?;

    info!(
        "Recorded join event {} for product {}",
        stored.id, stored.product_id
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "customer": CustomerResponse::from(stored)
        })),
    ))
}

// GET /customers
pub async fn get_recent_customers<S>(
    State(store): State<Arc<S>>,
) -> Result<Json<serde_json::Value>>
where
    S: JoinEventStore,
{
    let since = Utc::now() - Duration::hours(CUSTOMER_WINDOW_HOURS);
    let events = store.recent_joins(since, CUSTOMER_LIMIT).await?;

    let customers: Vec<CustomerResponse> = events.into_iter().map(CustomerResponse::from).collect();

    Ok(Json(
        serde_json::json!({ "success": true, "customers": customers }),
    ))
}

// GET /notifications
pub async fn get_notifications<S>(
    State(store): State<Arc<S>>,
) -> Result<(HeaderMap, Json<serde_json::Value>)>
where
    S: JoinEventStore,
{
    let since = Utc::now() - Duration::minutes(NOTIFICATION_WINDOW_MINUTES);
    let events = store.recent_joins(since, NOTIFICATION_LIMIT).await?;

    let notifications: Vec<NotificationResponse> =
        events.into_iter().map(NotificationResponse::from).collect();

    Ok((
        no_store_headers(),
        Json(serde_json::json!({ "success": true, "notifications": notifications })),
    ))
}

// GET /health
pub async fn health<S>(State(store): State<Arc<S>>) -> Json<serde_json::Value>
where
    S: JoinEventStore,
{
    let since = Utc::now() - Duration::minutes(1);
    let database = match store.recent_joins(since, 1).await {
        Ok(_) => "connected",
        Err(_) => "error",
    };

    Json(serde_json::json!({ "status": "ok", "database": database }))
}
