use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware,
    routing::{get, post, put},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    admin_catalog_handlers::{
        create_category, create_product, delete_category, delete_product, list_categories_admin,
        list_products_admin, update_category, update_product,
    },
    catalog_handlers::{get_categories, get_products},
    join_handlers::{get_notifications, get_recent_customers, health, record_join},
    media_handlers::{upload_image, MAX_UPLOAD_BODY_BYTES},
    order_handlers::{create_order, delete_order, list_orders, update_order, AdminStores},
    phone_handlers::register_phone_number,
    user_handlers::{list_users, login, me},
};
use pinkcart_shared::store::dynamo::{
    DynamoCatalogStore, DynamoJoinEventStore, DynamoOrderStore, DynamoPhoneNumberStore,
    DynamoUserStore,
};
use pinkcart_shared::store::{
    CatalogStore, JoinEventStore, OrderStore, PhoneNumberStore, UserStore,
};

// Import shared auth middleware
use pinkcart_shared::auth::auth_middleware;

/// Creates a router with the default stores
pub async fn create_router() -> Router {
    info!("Creating router with DynamoDB stores");

    let catalog = Arc::new(DynamoCatalogStore::new().await);
    let joins = Arc::new(DynamoJoinEventStore::new().await);
    let orders = Arc::new(DynamoOrderStore::new().await);
    let users = Arc::new(DynamoUserStore::new().await);
    let phones = Arc::new(DynamoPhoneNumberStore::new().await);

    // Check if we should remove the base path prefix
    let remove_base_path = std::env::var("REMOVE_BASE_PATH")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    // If REMOVE_BASE_PATH is set to true, don't add the /Prod prefix
    let prefix = if remove_base_path { "" } else { "/Prod" };
    info!("Using API route prefix: {}", prefix);

    create_router_with_stores(catalog, joins, orders, users, phones, prefix)
}

/// Creates a router with the given store implementations
pub fn create_router_with_stores<C, J, O, U, P>(
    catalog: Arc<C>,
    joins: Arc<J>,
    orders: Arc<O>,
    users: Arc<U>,
    phones: Arc<P>,
    prefix: &str,
) -> Router
where
    C: CatalogStore + 'static,
    J: JoinEventStore + 'static,
    O: OrderStore + 'static,
    U: UserStore + 'static,
    P: PhoneNumberStore + 'static,
{
    info!("Setting up API routes with prefix: '{}'", prefix);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    // Public storefront reads (no auth)
    let public_catalog_routes = Router::new()
        .route("/products", get(get_products))
        .route("/categories", get(get_categories))
        .with_state(catalog.clone());

    // Join events: recording plus the polling feed
    let join_routes = Router::new()
        .route("/customers", get(get_recent_customers).post(record_join))
        .route("/notifications", get(get_notifications))
        .route("/health", get(health))
        .with_state(joins);

    let phone_routes = Router::new()
        .route("/phone-numbers", post(register_phone_number))
        .with_state(phones);

    // Login is the one admin route outside the auth layer
    let login_routes = Router::new()
        .route("/admin/login", post(login))
        .with_state(users.clone());

    let admin_catalog_routes = Router::new()
        .route(
            "/admin/products",
            get(list_products_admin).post(create_product),
        )
        .route(
            "/admin/products/:id",
            put(update_product).delete(delete_product),
        )
        .route(
            "/admin/categories",
            get(list_categories_admin).post(create_category),
        )
        .route(
            "/admin/categories/:id",
            put(update_category).delete(delete_category),
        )
        .layer(middleware::from_fn(auth_middleware))
        .with_state(catalog.clone());

    let admin_order_routes = Router::new()
        .route("/admin/orders", get(list_orders).post(create_order))
        .route("/admin/orders/:id", put(update_order).delete(delete_order))
        .layer(middleware::from_fn(auth_middleware))
        .with_state(AdminStores {
            orders,
            users: users.clone(),
            catalog,
        });

    let admin_user_routes = Router::new()
        .route("/admin/me", get(me))
        .route("/admin/users", get(list_users))
        .layer(middleware::from_fn(auth_middleware))
        .with_state(users);

    let admin_media_routes = Router::new()
        .route("/admin/upload", post(upload_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
        .layer(middleware::from_fn(auth_middleware));

    // Merge all API routes
    let api_routes = public_catalog_routes
        .merge(join_routes)
        .merge(phone_routes)
        .merge(login_routes)
        .merge(admin_catalog_routes)
        .merge(admin_order_routes)
        .merge(admin_user_routes)
        .merge(admin_media_routes);

    // Create the main router
    let router = if prefix.is_empty() {
        // For tests or when no prefix is needed, don't nest the routes
        api_routes
            .layer(cors)
            .layer(middleware::from_fn(logging_middleware))
    } else {
        // For production, nest the routes under the prefix
        Router::new()
            .nest(prefix, api_routes)
            .layer(cors)
            .layer(middleware::from_fn(logging_middleware))
    };

    info!(
        "Router configured with all routes and middleware under prefix: '{}'",
        prefix
    );

    // Add a fallback handler for 404s
    router.fallback(|req: Request| async move {
        warn!("No route matched for: {} {}", req.method(), req.uri());
        (
            axum::http::StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    })
}
