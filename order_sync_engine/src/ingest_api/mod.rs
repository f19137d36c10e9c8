//! # Order ingestion API
//!
//! [`order_ingest_api::OrderIngestApi`] drives a single sync run. It is created by supplying an [`OrderSource`], an
//! [`OrderStore`] and a mapper that turns the source's raw order records into [`NewOrderRow`]s.
//!
//! ```rust,ignore
//! use order_sync_engine::{OrderIngestApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/orders.db", 1).await?;
//! let api = OrderIngestApi::new(my_source, db, my_mapper);
//! let summary = api.run().await?;
//! println!("{} orders saved", summary.orders_inserted);
//! ```
//!
//! [`OrderSource`]: crate::traits::OrderSource
//! [`OrderStore`]: crate::traits::OrderStore
//! [`NewOrderRow`]: crate::db_types::NewOrderRow
pub mod errors;
pub mod ingest_objects;
pub mod order_ingest_api;
