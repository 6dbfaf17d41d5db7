use std::collections::HashMap;
use std::env;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::models::{Category, JoinEvent, Order, PhoneNumber, Product, Role, User};
use crate::store::{
    CatalogStore, JoinEventStore, OrderStore, PhoneNumberStore, StoreResult, UserStore,
};

const DEFAULT_PRODUCTS_TABLE: &str = "pinkcart-products";
const DEFAULT_CATEGORIES_TABLE: &str = "pinkcart-categories";
const DEFAULT_CUSTOMERS_TABLE: &str = "pinkcart-customers";
const DEFAULT_ORDERS_TABLE: &str = "pinkcart-orders";
const DEFAULT_USERS_TABLE: &str = "pinkcart-users";
const DEFAULT_PHONE_NUMBERS_TABLE: &str = "pinkcart-phone-numbers";

async fn default_client() -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    Client::new(&config)
}

fn table_from_env(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

async fn put_new<T: Serialize>(client: &Client, table: &str, value: &T) -> StoreResult<()> {
    let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(value)?;
    client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .send()
        .await
        .map_err(|e| StoreError::Internal(format!("put_item failed: {:?}", e)))?;
    Ok(())
}

/// Full-record write that requires the item to already exist. Last write wins;
/// there is no version check.
async fn put_existing<T: Serialize>(
    client: &Client,
    table: &str,
    id: &str,
    value: &T,
) -> StoreResult<()> {
    let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(value)?;
    client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .condition_expression("attribute_exists(id)")
        .send()
        .await
        .map_err(|e| {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                StoreError::NotFound(format!("Item with ID {} not found", id))
            } else {
                StoreError::Internal(format!("put_item failed: {:?}", service_err))
            }
        })?;
    Ok(())
}

async fn get_by_id<T: DeserializeOwned>(client: &Client, table: &str, id: &str) -> StoreResult<T> {
    let output = client
        .get_item()
        .table_name(table)
        .key("id", AttributeValue::S(id.to_string()))
        .send()
        .await
        .map_err(|e| StoreError::Internal(format!("get_item failed: {:?}", e)))?;

    match output.item {
        Some(item) => Ok(serde_dynamo::from_item(item)?),
        None => Err(StoreError::NotFound(format!(
            "Item with ID {} not found",
            id
        ))),
    }
}

async fn delete_by_id(client: &Client, table: &str, id: &str) -> StoreResult<()> {
    client
        .delete_item()
        .table_name(table)
        .key("id", AttributeValue::S(id.to_string()))
        .condition_expression("attribute_exists(id)")
        .send()
        .await
        .map_err(|e| {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                StoreError::NotFound(format!("Item with ID {} not found", id))
            } else {
                StoreError::Internal(format!("delete_item failed: {:?}", service_err))
            }
        })?;
    Ok(())
}

/// Paginated scan, optionally with a filter expression.
async fn scan_items<T: DeserializeOwned>(
    client: &Client,
    table: &str,
    filter: Option<(&str, HashMap<String, AttributeValue>, Option<HashMap<String, String>>)>,
) -> StoreResult<Vec<T>> {
    let mut items = Vec::new();
    let mut exclusive_start_key = None;

    loop {
        let mut request = client.scan().table_name(table);
        if let Some((expression, values, names)) = &filter {
            request = request
                .filter_expression(*expression)
                .set_expression_attribute_values(Some(values.clone()));
            if let Some(names) = names {
                request = request.set_expression_attribute_names(Some(names.clone()));
            }
        }
        let output = request
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(|e| StoreError::Internal(format!("scan failed: {:?}", e)))?;

        for item in output.items.unwrap_or_default() {
            items.push(serde_dynamo::from_item(item)?);
        }

        exclusive_start_key = output.last_evaluated_key;
        if exclusive_start_key.is_none() {
            break;
        }
    }

    debug!("Scanned {} items from table {}", items.len(), table);
    Ok(items)
}

pub struct DynamoCatalogStore {
    client: Client,
    products_table: String,
    categories_table: String,
}

impl DynamoCatalogStore {
    pub async fn new() -> Self {
        Self {
            client: default_client().await,
            products_table: table_from_env("PRODUCTS_TABLE", DEFAULT_PRODUCTS_TABLE),
            categories_table: table_from_env("CATEGORIES_TABLE", DEFAULT_CATEGORIES_TABLE),
        }
    }

    pub fn with_client_and_tables(
        client: Client,
        products_table: String,
        categories_table: String,
    ) -> Self {
        Self {
            client,
            products_table,
            categories_table,
        }
    }
}

#[async_trait]
impl CatalogStore for DynamoCatalogStore {
    async fn create_product(&self, product: Product) -> StoreResult<Product> {
        put_new(&self.client, &self.products_table, &product).await?;
        Ok(product)
    }

    async fn get_product(&self, id: &str) -> StoreResult<Product> {
        get_by_id(&self.client, &self.products_table, id).await
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        scan_items(&self.client, &self.products_table, None).await
    }

    async fn update_product(&self, product: Product) -> StoreResult<Product> {
        put_existing(&self.client, &self.products_table, &product.id, &product).await?;
        Ok(product)
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        delete_by_id(&self.client, &self.products_table, id).await
    }

    async fn create_category(&self, category: Category) -> StoreResult<Category> {
        put_new(&self.client, &self.categories_table, &category).await?;
        Ok(category)
    }

    async fn get_category(&self, id: &str) -> StoreResult<Category> {
        get_by_id(&self.client, &self.categories_table, id).await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        scan_items(&self.client, &self.categories_table, None).await
    }

    async fn update_category(&self, category: Category) -> StoreResult<Category> {
        put_existing(&self.client, &self.categories_table, &category.id, &category).await?;
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> StoreResult<()> {
        delete_by_id(&self.client, &self.categories_table, id).await
    }
}

pub struct DynamoJoinEventStore {
    client: Client,
    table_name: String,
}

impl DynamoJoinEventStore {
    pub async fn new() -> Self {
        Self {
            client: default_client().await,
            table_name: table_from_env("CUSTOMERS_TABLE", DEFAULT_CUSTOMERS_TABLE),
        }
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl JoinEventStore for DynamoJoinEventStore {
    async fn record_join(&self, event: JoinEvent) -> StoreResult<JoinEvent> {
        // expires_at rides along as the table's TTL attribute.
        put_new(&self.client, &self.table_name, &event).await?;
        Ok(event)
    }

    async fn recent_joins(&self, since: DateTime<Utc>, limit: usize) -> StoreResult<Vec<JoinEvent>> {
        let mut values = HashMap::new();
        values.insert(
            ":since".to_string(),
            AttributeValue::S(since.to_rfc3339()),
        );

        let mut events: Vec<JoinEvent> = scan_items(
            &self.client,
            &self.table_name,
            Some(("joinedAt >= :since", values, None)),
        )
        .await?;

        // Scan order is arbitrary; callers rely on newest-first.
        events.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        events.truncate(limit);
        Ok(events)
    }
}

pub struct DynamoOrderStore {
    client: Client,
    table_name: String,
}

impl DynamoOrderStore {
    pub async fn new() -> Self {
        Self {
            client: default_client().await,
            table_name: table_from_env("ORDERS_TABLE", DEFAULT_ORDERS_TABLE),
        }
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl OrderStore for DynamoOrderStore {
    async fn create_order(&self, order: Order) -> StoreResult<Order> {
        put_new(&self.client, &self.table_name, &order).await?;
        Ok(order)
    }

    async fn get_order(&self, id: &str) -> StoreResult<Order> {
        get_by_id(&self.client, &self.table_name, id).await
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        scan_items(&self.client, &self.table_name, None).await
    }

    async fn update_order(&self, order: Order) -> StoreResult<Order> {
        put_existing(&self.client, &self.table_name, &order.id, &order).await?;
        Ok(order)
    }

    async fn delete_order(&self, id: &str) -> StoreResult<()> {
        delete_by_id(&self.client, &self.table_name, id).await
    }
}

pub struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    pub async fn new() -> Self {
        Self {
            client: default_client().await,
            table_name: table_from_env("USERS_TABLE", DEFAULT_USERS_TABLE),
        }
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn create_user(&self, user: User) -> StoreResult<User> {
        put_new(&self.client, &self.table_name, &user).await?;
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> StoreResult<User> {
        get_by_id(&self.client, &self.table_name, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        let mut values = HashMap::new();
        values.insert(":email".to_string(), AttributeValue::S(email.to_string()));

        let users: Vec<User> = scan_items(
            &self.client,
            &self.table_name,
            Some(("email = :email", values, None)),
        )
        .await?;

        users
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("User with email {} not found", email)))
    }

    async fn list_users_by_role(&self, role: Role) -> StoreResult<Vec<User>> {
        let mut values = HashMap::new();
        values.insert(":role".to_string(), AttributeValue::S(role.to_string()));
        // "role" collides with a reserved word, hence the name alias.
        let mut names = HashMap::new();
        names.insert("#role".to_string(), "role".to_string());

        scan_items(
            &self.client,
            &self.table_name,
            Some(("#role = :role", values, Some(names))),
        )
        .await
    }
}

pub struct DynamoPhoneNumberStore {
    client: Client,
    table_name: String,
}

impl DynamoPhoneNumberStore {
    pub async fn new() -> Self {
        Self {
            client: default_client().await,
            table_name: table_from_env("PHONE_NUMBERS_TABLE", DEFAULT_PHONE_NUMBERS_TABLE),
        }
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl PhoneNumberStore for DynamoPhoneNumberStore {
    async fn save_phone_number(&self, number: PhoneNumber) -> StoreResult<PhoneNumber> {
        let mut values = HashMap::new();
        values.insert(
            ":number".to_string(),
            AttributeValue::S(number.phone_number.clone()),
        );

        let existing: Vec<PhoneNumber> = scan_items(
            &self.client,
            &self.table_name,
            Some(("phoneNumber = :number", values, None)),
        )
        .await?;

        if !existing.is_empty() {
            return Err(StoreError::Conflict(
                "This phone number is already registered".to_string(),
            ));
        }

        put_new(&self.client, &self.table_name, &number).await?;
        Ok(number)
    }

    async fn list_phone_numbers(&self) -> StoreResult<Vec<PhoneNumber>> {
        scan_items(&self.client, &self.table_name, None).await
    }
}
