use thiserror::Error;

use crate::{
    db_types::OrderId,
    traits::{OrderSourceError, OrderStoreError},
};

/// Raised when a raw marketplace record cannot be turned into a row, e.g. because it has no order id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not map order record. {0}")]
pub struct OrderMappingError(pub String);

impl OrderMappingError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, Error)]
pub enum IngestError {
    #[error("Authentication failed. {0}")]
    AuthError(String),
    #[error("Fetching orders failed. {0}")]
    FetchError(String),
    #[error("{0}")]
    MappingError(#[from] OrderMappingError),
    #[error("Order {0} has already been stored")]
    DuplicateOrder(OrderId),
    #[error("Could not persist orders. {0}")]
    PersistenceError(String),
}

impl From<OrderSourceError> for IngestError {
    fn from(e: OrderSourceError) -> Self {
        match e {
            OrderSourceError::AuthError(s) => IngestError::AuthError(s),
            OrderSourceError::FetchError(s) => IngestError::FetchError(s),
        }
    }
}

impl From<OrderStoreError> for IngestError {
    fn from(e: OrderStoreError) -> Self {
        match e {
            OrderStoreError::DuplicateOrder(id) => IngestError::DuplicateOrder(id),
            OrderStoreError::DatabaseError(s) => IngestError::PersistenceError(s),
        }
    }
}
