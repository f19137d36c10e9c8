use thiserror::Error;

use crate::db_types::{NewOrderRow, OrderId};

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("The order database failed. {0}")]
    DatabaseError(String),
    #[error("Cannot insert order, since it already exists with id {0}")]
    DuplicateOrder(OrderId),
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        OrderStoreError::DatabaseError(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for OrderStoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        OrderStoreError::DatabaseError(format!("Schema migration failed. {e}"))
    }
}

/// The destination for ingested orders.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Creates the `Orders` table if it does not exist yet. Calling this on an existing schema is a no-op.
    async fn ensure_schema(&self) -> Result<(), OrderStoreError>;

    /// Inserts a single order as its own unit of work, stamping `ChangeDate` with the current time.
    ///
    /// If an order with the same `AmazonOrderId` is already stored, [`OrderStoreError::DuplicateOrder`] is returned
    /// and nothing is written.
    async fn insert_order(&self, order: NewOrderRow) -> Result<(), OrderStoreError>;
}
