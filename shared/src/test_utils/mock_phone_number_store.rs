use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::PhoneNumber;
use crate::store::{PhoneNumberStore, StoreResult};

#[derive(Default)]
pub struct MockPhoneNumberStore {
    numbers: RwLock<Vec<PhoneNumber>>,
}

impl MockPhoneNumberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhoneNumberStore for MockPhoneNumberStore {
    async fn save_phone_number(&self, number: PhoneNumber) -> StoreResult<PhoneNumber> {
        let mut numbers = self.numbers.write().await;
        if numbers.iter().any(|n| n.phone_number == number.phone_number) {
            return Err(StoreError::Conflict(
                "This phone number is already registered".to_string(),
            ));
        }
        numbers.push(number.clone());
        Ok(number)
    }

    async fn list_phone_numbers(&self) -> StoreResult<Vec<PhoneNumber>> {
        Ok(self.numbers.read().await.clone())
    }
}
