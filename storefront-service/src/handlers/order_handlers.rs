use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use log::info;
use pinkcart_shared::auth::AuthContext;
use pinkcart_shared::error::StoreError;
use pinkcart_shared::models::{now_str, Order, Role};
use pinkcart_shared::store::{CatalogStore, OrderStore, UserStore};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CreateOrderRequest, OrderResponse, UpdateOrderRequest};

/// Order handlers resolve the referenced user and product, so they carry all
/// three stores as router state.
pub struct AdminStores<O, U, C> {
    pub orders: Arc<O>,
    pub users: Arc<U>,
    pub catalog: Arc<C>,
}

impl<O, U, C> Clone for AdminStores<O, U, C> {
    fn clone(&self) -> Self {
        AdminStores {
            orders: self.orders.clone(),
            users: self.users.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

// GET /admin/orders
pub async fn list_orders<O, U, C>(
    State(stores): State<AdminStores<O, U, C>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>>
where
    O: OrderStore,
    U: UserStore,
    C: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    let mut orders = stores.orders.list_orders().await?;
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let users: HashMap<String, _> = stores
        .users
        .list_users_by_role(Role::User)
        .await?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect();
    let products: HashMap<String, _> = stores
        .catalog
        .list_products()
        .await?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    let orders: Vec<OrderResponse> = orders
        .into_iter()
        .map(|order| {
            let user = users.get(&order.user_id);
            let product = products.get(&order.product_id);
            OrderResponse::from_order(order, user, product)
        })
        .collect();

    Ok(Json(serde_json::json!({ "orders": orders })))
}

// POST /admin/orders
pub async fn create_order<O, U, C>(
    State(stores): State<AdminStores<O, U, C>>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)>
where
    O: OrderStore,
    U: UserStore,
    C: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    let quantity = payload.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::bad_request(
            "Quantity must be at least 1".to_string(),
        ));
    }

    // Orders do reference live records, unlike join events.
    let user = match stores.users.get_user(&payload.user_id).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => {
            return Err(AppError::bad_request("User not found".to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let product = match stores.catalog.get_product(&payload.product_id).await {
        Ok(product) => product,
        Err(StoreError::NotFound(_)) => {
            return Err(AppError::bad_request("Product not found".to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let now = now_str();
    let order = Order {
        id: Uuid::new_v4().to_string(),
        user_id: payload.user_id,
        product_id: payload.product_id,
        quantity,
        status: payload.status.unwrap_or_default(),
        created_at: now.clone(),
        updated_at: now,
    };

    let created = stores.orders.create_order(order).await?;

    info!("Created order {}", created.id);

    let response = OrderResponse::from_order(created, Some(&user), Some(&product));

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "order": response,
            "message": "Order created successfully"
        })),
    ))
}

// PUT /admin/orders/:id
pub async fn update_order<O, U, C>(
    State(stores): State<AdminStores<O, U, C>>,
    Path(id): Path<String>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<serde_json::Value>>
where
    O: OrderStore,
    U: UserStore,
    C: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    let mut order = stores.orders.get_order(&id).await?;

    if let Some(quantity) = payload.quantity {
        if quantity < 1 {
            return Err(AppError::bad_request(
                "Quantity must be at least 1".to_string(),
            ));
        }
        order.quantity = quantity;
    }
    if let Some(status) = payload.status {
        order.status = status;
    }
    order.updated_at = now_str();

    let updated = stores.orders.update_order(order).await?;

    let user = stores.users.get_user(&updated.user_id).await.ok();
    let product = stores.catalog.get_product(&updated.product_id).await.ok();
    let response = OrderResponse::from_order(updated, user.as_ref(), product.as_ref());

    Ok(Json(serde_json::json!({
        "success": true,
        "order": response,
        "message": "Order updated successfully"
    })))
}

// DELETE /admin/orders/:id
pub async fn delete_order<O, U, C>(
    State(stores): State<AdminStores<O, U, C>>,
    Path(id): Path<String>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>>
where
    O: OrderStore,
    U: UserStore,
    C: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    stores.orders.delete_order(&id).await?;

    info!("Deleted order {}", id);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Order deleted successfully"
    })))
}
