use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::Order;
use crate::store::{OrderStore, StoreResult};

#[derive(Default)]
pub struct MockOrderStore {
    orders: RwLock<HashMap<String, Order>>,
}

impl MockOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn create_order(&self, order: Order) -> StoreResult<Order> {
        self.orders
            .write()
            .await
            .insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: &str) -> StoreResult<Order> {
        self.orders
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Item with ID {} not found", id)))
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.read().await.values().cloned().collect())
    }

    async fn update_order(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id) {
            return Err(StoreError::NotFound(format!(
                "Item with ID {} not found",
                order.id
            )));
        }
        orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn delete_order(&self, id: &str) -> StoreResult<()> {
        self.orders
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("Item with ID {} not found", id)))
    }
}
