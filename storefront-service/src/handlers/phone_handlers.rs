use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use log::info;
use pinkcart_shared::models::PhoneNumber;
use pinkcart_shared::store::PhoneNumberStore;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::RegisterPhoneNumberRequest;

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// POST /phone-numbers
pub async fn register_phone_number<S>(
    State(store): State<Arc<S>>,
    headers: HeaderMap,
    Json(payload): Json<RegisterPhoneNumberRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)>
where
    S: PhoneNumberStore,
{
    if payload.phone_number.is_empty() {
        return Err(AppError::bad_request("Phone number is required".to_string()));
    }

    // Kenyan mobile numbers: ten digits starting 07 or 01.
    let clean: String = payload
        .phone_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if clean.len() != 10 || !(clean.starts_with("07") || clean.starts_with("01")) {
        return Err(AppError::bad_request(
            "Please enter a valid Kenyan phone number".to_string(),
        ));
    }

    let ip_address = header_str(&headers, "x-forwarded-for")
        .or_else(|| header_str(&headers, "x-real-ip"));
    let user_agent = header_str(&headers, "user-agent");

    let record = PhoneNumber::new(clean, ip_address, user_agent);
    let stored = store.save_phone_number(record).await?;

    info!("Registered phone number {}", stored.id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Phone number registered successfully",
            "id": stored.id
        })),
    ))
}
