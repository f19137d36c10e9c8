//! SQLite database module for the Order Sync Engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
