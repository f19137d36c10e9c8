use order_sync_engine::{IngestError, OrderStoreError};
use sp_api_tools::SpApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Invalid configuration. {0}")]
    ConfigurationError(String),
    #[error("Could not open the orders database. {0}")]
    DatabaseError(String),
    #[error("Could not initialize the SP-API client. {0}")]
    InitializationError(String),
    #[error("Order sync failed. {0}")]
    IngestError(#[from] IngestError),
}

impl From<OrderStoreError> for SyncError {
    fn from(e: OrderStoreError) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl From<SpApiError> for SyncError {
    fn from(e: SpApiError) -> Self {
        Self::InitializationError(e.to_string())
    }
}
