use osync_common::Secret;
use thiserror::Error;

use crate::traits::OrderPage;

#[derive(Debug, Clone, Error)]
pub enum OrderSourceError {
    #[error("Could not obtain an access token. {0}")]
    AuthError(String),
    #[error("Could not fetch orders. {0}")]
    FetchError(String),
}

/// A marketplace that orders can be pulled from, one page at a time.
#[allow(async_fn_in_trait)]
pub trait OrderSource {
    /// The raw order record as delivered by the marketplace
    type Order;

    /// Exchanges the long-lived credentials for a short-lived access token. One token is used for the whole run.
    async fn access_token(&self) -> Result<Secret<String>, OrderSourceError>;

    /// Fetches one page of orders. `cursor` is `None` for the first page, and the `next_token` of the previous page
    /// thereafter.
    async fn fetch_page(
        &self,
        access_token: &Secret<String>,
        cursor: Option<String>,
    ) -> Result<OrderPage<Self::Order>, OrderSourceError>;
}
