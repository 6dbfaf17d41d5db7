use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use pinkcart_shared::models::{now_str, Category, Product, Role, User};
use pinkcart_shared::store::UserStore;
use pinkcart_shared::test_utils::mock_catalog_store::MockCatalogStore;
use pinkcart_shared::test_utils::mock_join_event_store::MockJoinEventStore;
use pinkcart_shared::test_utils::mock_order_store::MockOrderStore;
use pinkcart_shared::test_utils::mock_phone_number_store::MockPhoneNumberStore;
use pinkcart_shared::test_utils::mock_user_store::MockUserStore;
use pinkcart_shared::test_utils::test_logging::init_test_logging;

use crate::routes::create_router_with_stores;

mod admin_handlers_test;
mod phone_handlers_test;

pub struct TestStores {
    pub catalog: Arc<MockCatalogStore>,
    pub joins: Arc<MockJoinEventStore>,
    pub orders: Arc<MockOrderStore>,
    pub users: Arc<MockUserStore>,
    pub phones: Arc<MockPhoneNumberStore>,
}

/// Router backed entirely by in-memory mock stores.
pub fn create_test_app() -> (Router, TestStores) {
    init_test_logging();

    let stores = TestStores {
        catalog: Arc::new(MockCatalogStore::new()),
        joins: Arc::new(MockJoinEventStore::new()),
        orders: Arc::new(MockOrderStore::new()),
        users: Arc::new(MockUserStore::new()),
        phones: Arc::new(MockPhoneNumberStore::new()),
    };

    let app = create_router_with_stores(
        stores.catalog.clone(),
        stores.joins.clone(),
        stores.orders.clone(),
        stores.users.clone(),
        stores.phones.clone(),
        "",
    );

    (app, stores)
}

pub async fn seed_user(stores: &TestStores, email: &str, password: &str, role: Role) -> User {
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: Some("Test User".to_string()),
        // Minimum cost keeps the test suite fast.
        password_hash: bcrypt::hash(password, 4).unwrap(),
        role,
        created_at: now_str(),
    };
    stores.users.create_user(user.clone()).await.unwrap();
    user
}

pub fn test_product(name: &str) -> Product {
    let now = now_str();
    Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        price: 19.99,
        original_price: None,
        image: Some("legacy.jpg".to_string()),
        image_id: None,
        images: vec!["primary.jpg".to_string()],
        image_ids: vec![],
        category: "gadgets".to_string(),
        description: None,
        features: vec![],
        in_stock: true,
        joined_count: 0,
        shipping_estimate: None,
        created_at: now.clone(),
        updated_at: now,
    }
}

pub fn test_category(name: &str, sort_order: i32, is_active: bool) -> Category {
    let now = now_str();
    Category {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: None,
        image: None,
        image_id: None,
        is_active,
        sort_order,
        created_at: now.clone(),
        updated_at: now,
    }
}
