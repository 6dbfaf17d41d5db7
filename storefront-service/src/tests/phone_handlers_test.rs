use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use pinkcart_shared::store::PhoneNumberStore;
use pinkcart_shared::test_utils::http_test_utils::{create_public_request, response_to_json};

use crate::tests::create_test_app;

#[tokio::test]
async fn test_register_phone_number_normalizes_input() {
    let (app, stores) = create_test_app();

    let response = app
        .oneshot(create_public_request(
            "POST",
            "/phone-numbers",
            Some(json!({ "phoneNumber": "0712-345 678" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json_resp = response_to_json(response).await;
    assert_eq!(json_resp["success"], true);

    let numbers = stores.phones.list_phone_numbers().await.unwrap();
    assert_eq!(numbers.len(), 1);
    assert_eq!(numbers[0].phone_number, "0712345678");
}

#[tokio::test]
async fn test_register_phone_number_rejects_invalid() {
    let (app, _stores) = create_test_app();

    for number in ["", "12345", "0812345678", "07123456789"] {
        let response = app
            .clone()
            .oneshot(create_public_request(
                "POST",
                "/phone-numbers",
                Some(json!({ "phoneNumber": number })),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "number {:?} should be rejected",
            number
        );
    }
}

#[tokio::test]
async fn test_register_phone_number_rejects_duplicates() {
    let (app, _stores) = create_test_app();

    let payload = json!({ "phoneNumber": "0712345678" });

    let response = app
        .clone()
        .oneshot(create_public_request(
            "POST",
            "/phone-numbers",
            Some(payload.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(create_public_request(
            "POST",
            "/phone-numbers",
            Some(payload),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json_resp = response_to_json(response).await;
    assert_eq!(json_resp["error"], "This phone number is already registered");
}
