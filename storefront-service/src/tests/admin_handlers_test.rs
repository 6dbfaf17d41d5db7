use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;
use tower::ServiceExt;

use pinkcart_shared::auth::{
    create_test_request, generate_token_with_lifetime, request_with_bearer,
};
use pinkcart_shared::models::Role;
use pinkcart_shared::store::{CatalogStore, OrderStore};
use pinkcart_shared::test_utils::http_test_utils::{create_public_request, response_to_json};

use crate::tests::{create_test_app, seed_user, test_category, test_product};

#[tokio::test]
async fn test_admin_routes_reject_missing_token() {
    let (app, _stores) = create_test_app();

    let response = app
        .oneshot(request_with_bearer("GET", "/admin/products", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_expired_token() {
    let (app, _stores) = create_test_app();

    let token = generate_token_with_lifetime(
        "admin-1",
        "admin-1@test.local",
        Role::Admin,
        Duration::hours(-2),
    )
    .unwrap();

    let response = app
        .oneshot(request_with_bearer(
            "GET",
            "/admin/products",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_user_role() {
    let (app, _stores) = create_test_app();

    let response = app
        .oneshot(create_test_request(
            "GET",
            "/admin/products",
            "user-1",
            Role::User,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_accept_admin_and_super_admin() {
    let (app, _stores) = create_test_app();

    for role in [Role::Admin, Role::SuperAdmin] {
        let response = app
            .clone()
            .oneshot(create_test_request(
                "GET",
                "/admin/products",
                "admin-1",
                role,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_create_product_validation() {
    let (app, _stores) = create_test_app();

    // Missing name
    let response = app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/admin/products",
            "admin-1",
            Role::Admin,
            Some(json!({ "price": 10.0, "category": "gadgets" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative price
    let response = app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/admin/products",
            "admin-1",
            Role::Admin,
            Some(json!({ "name": "Widget", "price": -1.0, "category": "gadgets" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing category
    let response = app
        .oneshot(create_test_request(
            "POST",
            "/admin/products",
            "admin-1",
            Role::Admin,
            Some(json!({ "name": "Widget", "price": 10.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_crud() {
    let (app, stores) = create_test_app();

    // Create
    let response = app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/admin/products",
            "admin-1",
            Role::Admin,
            Some(json!({
                "name": "Widget",
                "price": 25.5,
                "category": "gadgets",
                "images": ["a.jpg", "b.jpg"]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_to_json(response).await;
    let id = created["product"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["product"]["joinedCount"], 0);
    assert_eq!(created["product"]["inStock"], true);

    // Update
    let response = app
        .clone()
        .oneshot(create_test_request(
            "PUT",
            &format!("/admin/products/{}", id),
            "admin-1",
            Role::Admin,
            Some(json!({ "price": 19.99, "inStock": false })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_to_json(response).await;
    assert_eq!(updated["product"]["price"], 19.99);
    assert_eq!(updated["product"]["inStock"], false);
    // Untouched fields survive the patch
    assert_eq!(updated["product"]["name"], "Widget");

    let stored = stores.catalog.get_product(&id).await.unwrap();
    assert_eq!(stored.price, 19.99);

    // Delete
    let response = app
        .clone()
        .oneshot(create_test_request(
            "DELETE",
            &format!("/admin/products/{}", id),
            "admin-1",
            Role::Admin,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone now: update and delete report 404
    let response = app
        .clone()
        .oneshot(create_test_request(
            "PUT",
            &format!("/admin/products/{}", id),
            "admin-1",
            Role::Admin,
            Some(json!({ "price": 5.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(create_test_request(
            "DELETE",
            &format!("/admin/products/{}", id),
            "admin-1",
            Role::Admin,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_products_resolve_primary_image() {
    let (app, stores) = create_test_app();

    stores
        .catalog
        .create_product(test_product("Widget"))
        .await
        .unwrap();

    let mut legacy_only = test_product("Oldie");
    legacy_only.images.clear();
    stores.catalog.create_product(legacy_only).await.unwrap();

    let response = app
        .oneshot(create_public_request("GET", "/products", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_resp = response_to_json(response).await;
    let products = json_resp["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    for product in products {
        match product["name"].as_str().unwrap() {
            "Widget" => assert_eq!(product["image"], "primary.jpg"),
            "Oldie" => assert_eq!(product["image"], "legacy.jpg"),
            other => panic!("unexpected product {}", other),
        }
    }
}

#[tokio::test]
async fn test_category_crud_and_public_listing() {
    let (app, stores) = create_test_app();

    // Create via the admin surface
    let response = app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/admin/categories",
            "admin-1",
            Role::Admin,
            Some(json!({ "name": "Gadgets", "sortOrder": 2 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_to_json(response).await;
    let id = created["category"]["id"].as_str().unwrap().to_string();

    // Seed one inactive and one earlier-sorted category directly
    stores
        .catalog
        .create_category(test_category("Hidden", 0, false))
        .await
        .unwrap();
    stores
        .catalog
        .create_category(test_category("Apparel", 1, true))
        .await
        .unwrap();

    // Public listing: active only, ordered by sortOrder
    let response = app
        .clone()
        .oneshot(create_public_request("GET", "/categories", None))
        .await
        .unwrap();
    let json_resp = response_to_json(response).await;
    let categories = json_resp["categories"].as_array().unwrap();
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apparel", "Gadgets"]);

    // Update
    let response = app
        .clone()
        .oneshot(create_test_request(
            "PUT",
            &format!("/admin/categories/{}", id),
            "admin-1",
            Role::Admin,
            Some(json!({ "isActive": false })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete, then 404 on the second attempt
    let response = app
        .clone()
        .oneshot(create_test_request(
            "DELETE",
            &format!("/admin/categories/{}", id),
            "admin-1",
            Role::Admin,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(create_test_request(
            "DELETE",
            &format!("/admin/categories/{}", id),
            "admin-1",
            Role::Admin,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_crud() {
    let (app, stores) = create_test_app();

    // Referenced records must exist for create
    let response = app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/admin/orders",
            "admin-1",
            Role::Admin,
            Some(json!({ "userId": "missing", "productId": "missing" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let customer = seed_user(&stores, "customer@test.local", "pw", Role::User).await;
    let product = test_product("Widget");
    let product_id = product.id.clone();
    stores.catalog.create_product(product).await.unwrap();

    let response = app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/admin/orders",
            "admin-1",
            Role::Admin,
            Some(json!({ "userId": customer.id, "productId": product_id })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_to_json(response).await;
    let order_id = created["order"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["order"]["quantity"], 1);
    assert_eq!(created["order"]["status"], "PENDING");
    assert_eq!(created["order"]["user"]["email"], "customer@test.local");
    assert_eq!(created["order"]["product"]["name"], "Widget");

    // Update status
    let response = app
        .clone()
        .oneshot(create_test_request(
            "PUT",
            &format!("/admin/orders/{}", order_id),
            "admin-1",
            Role::Admin,
            Some(json!({ "status": "SHIPPED", "quantity": 3 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_to_json(response).await;
    assert_eq!(updated["order"]["status"], "SHIPPED");
    assert_eq!(updated["order"]["quantity"], 3);

    let stored = stores.orders.get_order(&order_id).await.unwrap();
    assert_eq!(stored.quantity, 3);

    // Delete
    let response = app
        .clone()
        .oneshot(create_test_request(
            "DELETE",
            &format!("/admin/orders/{}", order_id),
            "admin-1",
            Role::Admin,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(create_test_request(
            "PUT",
            &format!("/admin/orders/{}", order_id),
            "admin-1",
            Role::Admin,
            Some(json!({ "quantity": 2 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let (app, stores) = create_test_app();

    seed_user(&stores, "admin@pinkcart.test", "correct horse", Role::Admin).await;

    let response = app
        .oneshot(create_public_request(
            "POST",
            "/admin/login",
            Some(json!({ "email": "admin@pinkcart.test", "password": "correct horse" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("auth-token="));
    assert!(cookie.contains("HttpOnly"));

    let json_resp = response_to_json(response).await;
    assert_eq!(json_resp["user"]["email"], "admin@pinkcart.test");
    assert_eq!(json_resp["user"]["role"], "ADMIN");
    assert!(json_resp["user"]["passwordHash"].is_null());
    assert!(!json_resp["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (app, stores) = create_test_app();

    seed_user(&stores, "admin@pinkcart.test", "correct horse", Role::Admin).await;

    // Wrong password
    let response = app
        .clone()
        .oneshot(create_public_request(
            "POST",
            "/admin/login",
            Some(json!({ "email": "admin@pinkcart.test", "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown email gets the same answer
    let response = app
        .clone()
        .oneshot(create_public_request(
            "POST",
            "/admin/login",
            Some(json!({ "email": "nobody@pinkcart.test", "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Missing fields
    let response = app
        .oneshot(create_public_request(
            "POST",
            "/admin/login",
            Some(json!({ "email": "", "password": "" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_non_admin_role() {
    let (app, stores) = create_test_app();

    seed_user(&stores, "shopper@pinkcart.test", "pw12345", Role::User).await;

    let response = app
        .oneshot(create_public_request(
            "POST",
            "/admin/login",
            Some(json!({ "email": "shopper@pinkcart.test", "password": "pw12345" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_echoes_auth_context() {
    let (app, _stores) = create_test_app();

    let response = app
        .oneshot(create_test_request(
            "GET",
            "/admin/me",
            "admin-7",
            Role::SuperAdmin,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json_resp = response_to_json(response).await;
    assert_eq!(json_resp["user"]["id"], "admin-7");
    assert_eq!(json_resp["user"]["role"], "SUPER_ADMIN");
}

#[tokio::test]
async fn test_users_listing_requires_super_admin() {
    let (app, stores) = create_test_app();

    seed_user(&stores, "shopper@pinkcart.test", "pw", Role::User).await;

    let response = app
        .clone()
        .oneshot(create_test_request(
            "GET",
            "/admin/users",
            "admin-1",
            Role::Admin,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(create_test_request(
            "GET",
            "/admin/users",
            "root-1",
            Role::SuperAdmin,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json_resp = response_to_json(response).await;
    let users = json_resp["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "shopper@pinkcart.test");
    assert!(users[0]["passwordHash"].is_null());
}
