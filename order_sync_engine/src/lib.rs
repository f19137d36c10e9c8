//! Order Sync Engine
//!
//! This library contains the core logic for syncing marketplace orders into a local database. It is
//! provider-agnostic: the marketplace is reached through the [`OrderSource`] trait and the database through the
//! [`OrderStore`] trait.
//!
//! The library is divided into three main sections:
//! 1. Database management ([`mod@sqlite`]). SQLite is the supported backend. The row types that are written to and
//!    read from the database are defined in [`mod@db_types`].
//! 2. The traits ([`mod@traits`]) that marketplace clients and database backends implement.
//! 3. The ingestion API ([`OrderIngestApi`]), which runs the paginated fetch-map-insert loop.
pub mod db_types;
mod ingest_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use ingest_api::{
    errors::{IngestError, OrderMappingError},
    ingest_objects::IngestSummary,
    order_ingest_api::OrderIngestApi,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{OrderPage, OrderSource, OrderSourceError, OrderStore, OrderStoreError};
