use log::*;
use order_sync_engine::{IngestSummary, OrderIngestApi, SqliteDatabase};
use sp_api_tools::SpApi;

use crate::{config::SyncConfig, errors::SyncError, order_mapper::map_order, sp_order_source::SpOrderSource};

/// Runs one complete sync with the given configuration and returns the progress counters.
///
/// The database is opened (and created, if need be) before anything is requested from the SP-API.
pub async fn run_sync(config: SyncConfig) -> Result<IngestSummary, SyncError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_db_connections).await?;
    info!("🗃️ Connected to {}", db.url());
    let api = SpApi::new(config.sp_api.clone())?;
    let source = SpOrderSource::new(api, config.orders_query());
    let ingest = OrderIngestApi::new(source, db.clone(), map_order);
    let result = ingest.run().await;
    db.close().await;
    Ok(result?)
}
