//! # Configuration
//!
//! Everything is read from environment variables (a `.env` file is loaded first, if there is one).
//!
//! | Variable                     | Default                     |
//! |------------------------------|-----------------------------|
//! | `AMAZON_OAUTH_CLIENT_ID`     | required                    |
//! | `AMAZON_OAUTH_CLIENT_SECRET` | required                    |
//! | `AMAZON_OAUTH_REFRESH_TOKEN` | required                    |
//! | `OSYNC_CREATED_AFTER`        | required                    |
//! | `OSYNC_MARKETPLACE_ID`       | `ATVPDKIKX0DER`             |
//! | `OSYNC_PAGE_SIZE`            | `100`                       |
//! | `OSYNC_DATABASE_URL`         | `sqlite://data/orders.db`   |
//! | `OSYNC_MAX_DB_CONNECTIONS`   | `1`                         |
//! | `OSYNC_TOKEN_ENDPOINT`       | the Login-with-Amazon token endpoint |
//! | `OSYNC_ORDERS_ENDPOINT`      | the North America `getOrders` endpoint |
use std::env;

use log::*;
use order_sync_engine::sqlite::db::DEFAULT_DATABASE_URL;
use osync_common::helpers::non_blank;
use sp_api_tools::{
    helpers::is_valid_created_after,
    OrdersQuery,
    SpApiConfig,
    DEFAULT_MARKETPLACE_ID,
    MAX_RESULTS_PER_PAGE,
};

use crate::errors::SyncError;

const DEFAULT_MAX_DB_CONNECTIONS: u32 = 1;

#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Endpoints and OAuth credentials for the Selling Partner API
    pub sp_api: SpApiConfig,
    pub marketplace_id: String,
    /// ISO-8601 date. Only orders created after this date are synced.
    pub created_after: String,
    /// Orders per page, always in `1..=100`
    pub page_size: u32,
    pub database_url: String,
    pub max_db_connections: u32,
}

impl SyncConfig {
    pub fn try_from_env() -> Result<Self, SyncError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Missing required values are reported by name.
    pub fn from_vars<F>(var: F) -> Result<Self, SyncError>
    where F: Fn(&str) -> Option<String> {
        let sp_api = SpApiConfig::from_vars(&var).map_err(|e| SyncError::ConfigurationError(e.to_string()))?;
        let created_after = non_blank(var("OSYNC_CREATED_AFTER"))
            .ok_or_else(|| SyncError::ConfigurationError("OSYNC_CREATED_AFTER is not set".into()))?;
        if !is_valid_created_after(&created_after) {
            return Err(SyncError::ConfigurationError(format!(
                "OSYNC_CREATED_AFTER must be an ISO date, e.g. 2023-12-31. Got {created_after}"
            )));
        }
        let marketplace_id = non_blank(var("OSYNC_MARKETPLACE_ID")).unwrap_or_else(|| {
            info!("🪛️ OSYNC_MARKETPLACE_ID is not set. Using {DEFAULT_MARKETPLACE_ID}.");
            DEFAULT_MARKETPLACE_ID.to_string()
        });
        let page_size = configure_page_size(non_blank(var("OSYNC_PAGE_SIZE")));
        let database_url = non_blank(var("OSYNC_DATABASE_URL")).unwrap_or_else(|| {
            info!("🪛️ OSYNC_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_db_connections = non_blank(var("OSYNC_MAX_DB_CONNECTIONS"))
            .and_then(|s| {
                s.parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .or_else(|| {
                        warn!("🪛️ Invalid value for OSYNC_MAX_DB_CONNECTIONS: {s}. Using {DEFAULT_MAX_DB_CONNECTIONS}.");
                        None
                    })
            })
            .unwrap_or(DEFAULT_MAX_DB_CONNECTIONS);
        Ok(Self { sp_api, marketplace_id, created_after, page_size, database_url, max_db_connections })
    }

    pub fn orders_query(&self) -> OrdersQuery {
        OrdersQuery::new(&self.marketplace_id, &self.created_after, self.page_size)
    }
}

fn configure_page_size(value: Option<String>) -> u32 {
    let Some(s) = value else {
        return MAX_RESULTS_PER_PAGE;
    };
    match s.parse::<u32>() {
        Ok(n) if (1..=MAX_RESULTS_PER_PAGE).contains(&n) => n,
        Ok(n) => {
            warn!("🪛️ OSYNC_PAGE_SIZE must be between 1 and {MAX_RESULTS_PER_PAGE}. Using {MAX_RESULTS_PER_PAGE} instead of {n}.");
            MAX_RESULTS_PER_PAGE
        },
        Err(e) => {
            warn!("🪛️ Invalid configuration value for OSYNC_PAGE_SIZE. {e}. Using {MAX_RESULTS_PER_PAGE}.");
            MAX_RESULTS_PER_PAGE
        },
    }
}
