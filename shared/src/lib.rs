pub mod auth;
pub mod error;
pub mod media;
pub mod models;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
