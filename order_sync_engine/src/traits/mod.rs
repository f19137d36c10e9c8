//! # Interface contracts
//!
//! This module defines the seams between the ingestion loop and the outside world.
//!
//! * [`OrderSource`] is implemented by marketplace clients. It knows how to obtain an access token and how to fetch a
//!   single page of orders for a given cursor.
//! * [`OrderStore`] is implemented by database backends. It creates the destination table and inserts one row at a
//!   time.
mod data_objects;
mod order_source;
mod order_store;

pub use data_objects::OrderPage;
pub use order_source::{OrderSource, OrderSourceError};
pub use order_store::{OrderStore, OrderStoreError};
