//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interaction are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool,
//! or create an atomic transaction as the need arises and call through to the functions without any other changes.
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod orders;

/// Where the orders end up when no database URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/orders.db";

/// Creates a connection pool. The database file, and any missing parent directories, are created if they do not exist
/// yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    if let Some(dir) = database_file(url).as_deref().and_then(Path::parent).filter(|p| !p.as_os_str().is_empty()) {
        if !dir.exists() {
            debug!("🗃️ Creating database directory {}", dir.display());
            fs::create_dir_all(dir)?;
        }
    }
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}

/// Brings the schema up to date. Migrations that have already been applied are skipped, so this is safe to call on
/// every run.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./src/sqlite/migrations").run(pool).await?;
    debug!("🗃️ Database migrations are up to date");
    Ok(())
}

/// The file path part of a `sqlite:` URL. `None` for in-memory databases.
fn database_file(url: &str) -> Option<PathBuf> {
    let path = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:")).unwrap_or(url);
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}
