use axum::{extract::State, http::HeaderMap, Json};
use log::info;
use pinkcart_shared::store::CatalogStore;
use std::sync::Arc;

use crate::error::Result;
use crate::handlers::no_store_headers;
use crate::models::{CategoryResponse, ProductResponse};

// GET /products
pub async fn get_products<S>(State(store): State<Arc<S>>) -> Result<Json<serde_json::Value>>
where
    S: CatalogStore,
{
    let mut products = store.list_products().await?;

    // Newest first; the table scan has no inherent order.
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    info!("PUBLIC API: returning {} products", products.len());

    let products: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    Ok(Json(
        serde_json::json!({ "success": true, "products": products }),
    ))
}

// GET /categories
pub async fn get_categories<S>(
    State(store): State<Arc<S>>,
) -> Result<(HeaderMap, Json<serde_json::Value>)>
where
    S: CatalogStore,
{
    let mut categories = store.list_categories().await?;

    categories.retain(|c| c.is_active);
    categories.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    let categories: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();

    Ok((
        no_store_headers(),
        Json(serde_json::json!({ "success": true, "categories": categories })),
    ))
}
