//! `SqliteDatabase` is a concrete implementation of an order sync backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the [`OrderStore`] trait.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{new_pool, orders, run_migrations};
use crate::{
    db_types::{NewOrderRow, OrderId, OrderRow},
    traits::{OrderStore, OrderStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl OrderStore for SqliteDatabase {
    async fn ensure_schema(&self) -> Result<(), OrderStoreError> {
        run_migrations(&self.pool).await?;
        Ok(())
    }

    async fn insert_order(&self, order: NewOrderRow) -> Result<(), OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let id = order.amazon_order_id.clone();
        orders::insert_order(order, &mut conn).await?;
        debug!("🗃️ Order {id} has been saved in the DB");
        Ok(())
    }
}

impl SqliteDatabase {
    /// Connects to the database at `url`, creating the file if it does not exist yet.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, OrderStoreError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Retrieve the order with the given `AmazonOrderId`. If no entry exists, `None` will be returned.
    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<OrderRow>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order(order_id, &mut conn).await
    }

    /// Fetches every stored order, in insertion order.
    pub async fn fetch_orders(&self) -> Result<Vec<OrderRow>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders(&mut conn).await
    }

    pub async fn order_count(&self) -> Result<i64, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::order_count(&mut conn).await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
