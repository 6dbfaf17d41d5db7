use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Category, Product};
use crate::store::{CatalogStore, StoreResult};

/// In-memory catalog store for handler tests.
#[derive(Default)]
pub struct MockCatalogStore {
    products: RwLock<HashMap<String, Product>>,
    categories: RwLock<HashMap<String, Category>>,
}

impl MockCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MockCatalogStore {
    async fn create_product(&self, product: Product) -> StoreResult<Product> {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: &str) -> StoreResult<Product> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Item with ID {} not found", id)))
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn update_product(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(StoreError::NotFound(format!(
                "Item with ID {} not found",
                product.id
            )));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        self.products
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("Item with ID {} not found", id)))
    }

    async fn create_category(&self, category: Category) -> StoreResult<Category> {
        self.categories
            .write()
            .await
            .insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: &str) -> StoreResult<Category> {
        self.categories
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Item with ID {} not found", id)))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories.read().await.values().cloned().collect())
    }

    async fn update_category(&self, category: Category) -> StoreResult<Category> {
        let mut categories = self.categories.write().await;
        if !categories.contains_key(&category.id) {
            return Err(StoreError::NotFound(format!(
                "Item with ID {} not found",
                category.id
            )));
        }
        categories.insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> StoreResult<()> {
        self.categories
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("Item with ID {} not found", id)))
    }
}
