//! # Order sync
//! This crate hosts the `order_sync` executable. A run:
//! * exchanges the configured Login-with-Amazon refresh token for an access token,
//! * makes sure the `Orders` table exists,
//! * pages through `getOrders` for the configured marketplace and `CreatedAfter` date, and
//! * saves every order to the database, one row at a time, in the order they arrive.
//!
//! The run stops at the first error. Rows saved before the error are kept.
//!
//! ## Configuration
//! The executable is configured via environment variables. See [config](config/index.html) for more information.

pub mod cli;
pub mod config;
pub mod errors;
pub mod order_mapper;
pub mod sp_order_source;
pub mod sync;
