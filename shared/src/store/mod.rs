use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::{Category, JoinEvent, Order, PhoneNumber, Product, Role, User};

pub mod dynamo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Products and categories. Updates are full-record writes (last write wins);
/// deletes are hard deletes with no cascade to orders or join events.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create_product(&self, product: Product) -> StoreResult<Product>;
    async fn get_product(&self, id: &str) -> StoreResult<Product>;
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn update_product(&self, product: Product) -> StoreResult<Product>;
    async fn delete_product(&self, id: &str) -> StoreResult<()>;

    async fn create_category(&self, category: Category) -> StoreResult<Category>;
    async fn get_category(&self, id: &str) -> StoreResult<Category>;
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn update_category(&self, category: Category) -> StoreResult<Category>;
    async fn delete_category(&self, id: &str) -> StoreResult<()>;
}

/// Append-only "customer joined" events.
#[async_trait]
pub trait JoinEventStore: Send + Sync {
    async fn record_join(&self, event: JoinEvent) -> StoreResult<JoinEvent>;

    /// Events with `joined_at >= since`, sorted descending by `joined_at` and
    /// capped at `limit`. The underlying table returns items in no particular
    /// order, so implementations sort before returning.
    async fn recent_joins(&self, since: DateTime<Utc>, limit: usize) -> StoreResult<Vec<JoinEvent>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: Order) -> StoreResult<Order>;
    async fn get_order(&self, id: &str) -> StoreResult<Order>;
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;
    async fn update_order(&self, order: Order) -> StoreResult<Order>;
    async fn delete_order(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: User) -> StoreResult<User>;
    async fn get_user(&self, id: &str) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<User>;
    async fn list_users_by_role(&self, role: Role) -> StoreResult<Vec<User>>;
}

#[async_trait]
pub trait PhoneNumberStore: Send + Sync {
    /// Rejects an already-registered number with `StoreError::Conflict`.
    async fn save_phone_number(&self, number: PhoneNumber) -> StoreResult<PhoneNumber>;
    async fn list_phone_numbers(&self) -> StoreResult<Vec<PhoneNumber>>;
}
