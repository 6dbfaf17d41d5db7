use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Join events are kept for 30 days via the DynamoDB TTL attribute.
pub const JOIN_EVENT_RETENTION_DAYS: i64 = 30;

/// Current time as an RFC 3339 string, the timestamp format used on every record.
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// Parses a stored RFC 3339 timestamp back into a `DateTime<Utc>`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Legacy single-image field, superseded by `images` but still honored on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub image_ids: Vec<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub in_stock: bool,
    pub joined_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_estimate: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Product {
    /// The display image: first entry of `images`, falling back to the legacy field.
    pub fn primary_image(&self) -> Option<String> {
        self.images.first().cloned().or_else(|| self.image.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "SHIPPED")]
    Shipped,
    #[serde(rename = "DELIVERED")]
    Delivered,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// A "customer joined the shipment" event. Created once, never updated; the
/// product name is a snapshot taken at join time and is not kept in sync with
/// the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEvent {
    pub id: String,
    pub display_name: String,
    pub product_id: String,
    pub product_name: String,
    pub joined_at: String,
    /// Epoch seconds consumed by the table's TTL configuration.
    pub expires_at: i64,
}

impl JoinEvent {
    pub fn new(display_name: &str, product_id: &str, product_name: &str) -> Self {
        let now = Utc::now();
        JoinEvent {
            id: Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            joined_at: now.to_rfc3339(),
            expires_at: (now + Duration::days(JOIN_EVENT_RETENTION_DAYS)).timestamp(),
        }
    }

    pub fn joined_at_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.joined_at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: String,
    pub phone_number: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl PhoneNumber {
    pub fn new(phone_number: String, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        PhoneNumber {
            id: Uuid::new_v4().to_string(),
            phone_number,
            created_at: now_str(),
            ip_address,
            user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_matches_privilege_levels() {
        assert!(Role::User < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
        assert!(Role::SuperAdmin >= Role::Admin);
    }

    #[test]
    fn join_event_snapshot_and_ttl() {
        let before = Utc::now();
        let event = JoinEvent::new("Asha", "p1", "Widget");
        let joined_at = event.joined_at_time().unwrap();
        assert!(joined_at >= before);
        assert_eq!(event.product_name, "Widget");
        let ttl_days = (event.expires_at - joined_at.timestamp()) / 86_400;
        assert_eq!(ttl_days, JOIN_EVENT_RETENTION_DAYS);
    }

    #[test]
    fn primary_image_prefers_images_list() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            price: 10.0,
            original_price: None,
            image: Some("legacy.jpg".to_string()),
            image_id: None,
            images: vec!["new.jpg".to_string(), "alt.jpg".to_string()],
            image_ids: vec![],
            category: "gadgets".to_string(),
            description: None,
            features: vec![],
            in_stock: true,
            joined_count: 0,
            shipping_estimate: None,
            created_at: now_str(),
            updated_at: now_str(),
        };
        assert_eq!(product.primary_image().as_deref(), Some("new.jpg"));

        product.images.clear();
        assert_eq!(product.primary_image().as_deref(), Some("legacy.jpg"));
    }
}
