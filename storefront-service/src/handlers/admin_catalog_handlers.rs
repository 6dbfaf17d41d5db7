use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use log::info;
use pinkcart_shared::auth::AuthContext;
use pinkcart_shared::models::{now_str, Category, Product, Role};
use pinkcart_shared::store::CatalogStore;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    CreateCategoryRequest, CreateProductRequest, UpdateCategoryRequest, UpdateProductRequest,
};

// GET /admin/products
pub async fn list_products_admin<S>(
    State(store): State<Arc<S>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    let mut products = store.list_products().await?;
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    info!("ADMIN API: found {} products", products.len());

    Ok(Json(serde_json::json!({ "products": products })))
}

// POST /admin/products
pub async fn create_product<S>(
    State(store): State<Arc<S>>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::bad_request("Product name is required".to_string()));
    }
    if payload.price < 0.0 {
        return Err(AppError::bad_request(
            "Price must be zero or greater".to_string(),
        ));
    }
    if payload.category.trim().is_empty() {
        return Err(AppError::bad_request("Category is required".to_string()));
    }

    let now = now_str();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: payload.name.trim().to_string(),
        price: payload.price,
        original_price: payload.original_price,
        image: payload.image,
        image_id: payload.image_id,
        images: payload.images,
        image_ids: payload.image_ids,
        category: payload.category.trim().to_string(),
        description: payload.description,
        features: payload.features,
        in_stock: payload.in_stock.unwrap_or(true),
        joined_count: 0,
        shipping_estimate: payload.shipping_estimate,
        created_at: now.clone(),
        updated_at: now,
    };

    let created = store.create_product(product).await?;

    info!("Created product {}", created.id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "product": created,
            "message": "Product created successfully"
        })),
    ))
}

// PUT /admin/products/:id
pub async fn update_product<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<serde_json::Value>>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    let mut product = store.get_product(&id).await?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::bad_request("Product name is required".to_string()));
        }
        product.name = name.trim().to_string();
    }
    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err(AppError::bad_request(
                "Price must be zero or greater".to_string(),
            ));
        }
        product.price = price;
    }
    if payload.original_price.is_some() {
        product.original_price = payload.original_price;
    }
    if payload.image.is_some() {
        product.image = payload.image;
    }
    if payload.image_id.is_some() {
        product.image_id = payload.image_id;
    }
    if let Some(images) = payload.images {
        product.images = images;
    }
    if let Some(image_ids) = payload.image_ids {
        product.image_ids = image_ids;
    }
    if let Some(category) = payload.category {
        product.category = category;
    }
    if payload.description.is_some() {
        product.description = payload.description;
    }
    if let Some(features) = payload.features {
        product.features = features;
    }
    if let Some(in_stock) = payload.in_stock {
        product.in_stock = in_stock;
    }
    if let Some(joined_count) = payload.joined_count {
        product.joined_count = joined_count;
    }
    if payload.shipping_estimate.is_some() {
        product.shipping_estimate = payload.shipping_estimate;
    }
    product.updated_at = now_str();

    // Last write wins; concurrent admin edits are not serialized.
    let updated = store.update_product(product).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "product": updated,
        "message": "Product updated successfully"
    })))
}

// DELETE /admin/products/:id
pub async fn delete_product<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    // Hard delete; orders and join events referencing the product keep their
    // denormalized snapshots.
    store.delete_product(&id).await?;

    info!("Deleted product {}", id);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Product deleted successfully"
    })))
}

// GET /admin/categories
pub async fn list_categories_admin<S>(
    State(store): State<Arc<S>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    let mut categories = store.list_categories().await?;
    categories.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    Ok(Json(serde_json::json!({ "categories": categories })))
}

// POST /admin/categories
pub async fn create_category<S>(
    State(store): State<Arc<S>>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::bad_request(
            "Category name is required".to_string(),
        ));
    }

    let now = now_str();
    let category = Category {
        id: Uuid::new_v4().to_string(),
        name: payload.name.trim().to_string(),
        description: payload.description,
        image: payload.image,
        image_id: payload.image_id,
        is_active: payload.is_active.unwrap_or(true),
        sort_order: payload.sort_order.unwrap_or(0),
        created_at: now.clone(),
        updated_at: now,
    };

    let created = store.create_category(category).await?;

    info!("Created category {}", created.id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "category": created,
            "message": "Category created successfully"
        })),
    ))
}

// PUT /admin/categories/:id
pub async fn update_category<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<serde_json::Value>>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    let mut category = store.get_category(&id).await?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::bad_request(
                "Category name is required".to_string(),
            ));
        }
        category.name = name.trim().to_string();
    }
    if payload.description.is_some() {
        category.description = payload.description;
    }
    if payload.image.is_some() {
        category.image = payload.image;
    }
    if payload.image_id.is_some() {
        category.image_id = payload.image_id;
    }
    if let Some(is_active) = payload.is_active {
        category.is_active = is_active;
    }
    if let Some(sort_order) = payload.sort_order {
        category.sort_order = sort_order;
    }
    category.updated_at = now_str();

    let updated = store.update_category(category).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "category": updated,
        "message": "Category updated successfully"
    })))
}

// DELETE /admin/categories/:id
pub async fn delete_category<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>>
where
    S: CatalogStore,
{
    ctx.require_role(Role::Admin)?;

    store.delete_category(&id).await?;

    info!("Deleted category {}", id);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Category deleted successfully"
    })))
}
