use log::*;
use order_sync_engine::{OrderPage, OrderSource, OrderSourceError};
use osync_common::Secret;
use sp_api_tools::{AmazonOrder, OrdersQuery, SpApi, SpApiError};

/// Presents the Selling Partner API `getOrders` operation as an engine [`OrderSource`].
///
/// The query (marketplace, `CreatedAfter` and page size) is fixed for the lifetime of the source; only the cursor
/// changes from page to page.
pub struct SpOrderSource {
    api: SpApi,
    query: OrdersQuery,
}

impl SpOrderSource {
    pub fn new(api: SpApi, query: OrdersQuery) -> Self {
        Self { api, query }
    }
}

impl OrderSource for SpOrderSource {
    type Order = AmazonOrder;

    async fn access_token(&self) -> Result<Secret<String>, OrderSourceError> {
        self.api.access_token().await.map_err(|e| {
            error!("🔑️ {e}");
            OrderSourceError::AuthError(e.to_string())
        })
    }

    async fn fetch_page(
        &self,
        access_token: &Secret<String>,
        cursor: Option<String>,
    ) -> Result<OrderPage<AmazonOrder>, OrderSourceError> {
        let page = self.api.fetch_orders_page(access_token, &self.query, cursor.as_deref()).await.map_err(|e| {
            match &e {
                SpApiError::FetchError { status, .. } => error!("📦️ Orders endpoint returned HTTP {status}"),
                _ => error!("📦️ {e}"),
            }
            OrderSourceError::FetchError(e.to_string())
        })?;
        Ok(OrderPage::new(page.orders, page.next_token))
    }
}
