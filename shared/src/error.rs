use thiserror::Error;

/// Errors surfaced by store implementations. Service crates map these onto
/// HTTP statuses at the handler boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("store error: {0}")]
    Internal(String),
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
