use std::env;

use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

/// Tests run against the in-memory mocks unless USE_DYNAMODB=true.
pub fn use_dynamodb() -> bool {
    env::var("USE_DYNAMODB")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Client pointed at a local DynamoDB endpoint with throwaway credentials.
pub async fn create_dynamo_client() -> Client {
    let endpoint =
        env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(endpoint)
        .region(aws_config::Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .load()
        .await;
    Client::new(&config)
}

/// Creates a table keyed by the string attribute `id`.
pub async fn create_id_table(client: &Client, table_name: &str) -> Result<(), String> {
    let attribute = AttributeDefinition::builder()
        .attribute_name("id")
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| e.to_string())?;
    let key = KeySchemaElement::builder()
        .attribute_name("id")
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| e.to_string())?;

    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(attribute)
        .key_schema(key)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

pub async fn clear_dynamo_table(client: &Client, table_name: &str) -> Result<(), String> {
    let scan = client
        .scan()
        .table_name(table_name)
        .send()
        .await
        .map_err(|e| format!("{:?}", e))?;

    for item in scan.items.unwrap_or_default() {
        if let Some(id) = item.get("id") {
            client
                .delete_item()
                .table_name(table_name)
                .key("id", id.clone())
                .send()
                .await
                .map_err(|e| format!("{:?}", e))?;
        }
    }
    Ok(())
}
