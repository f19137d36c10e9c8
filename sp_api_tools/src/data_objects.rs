use log::*;
use serde::{Deserialize, Serialize};

/// The upstream limit for `MaxResultsPerPage`.
pub const MAX_RESULTS_PER_PAGE: u32 = 100;
/// The amazon.com (US) marketplace.
pub const DEFAULT_MARKETPLACE_ID: &str = "ATVPDKIKX0DER";

/// An order as returned by the `getOrders` operation. Only the fields the sync cares about are modelled, and all of
/// them are optional on the wire. Validation happens when the order is mapped into a database row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmazonOrder {
    pub amazon_order_id: Option<String>,
    pub purchase_date: Option<String>,
    pub last_update_date: Option<String>,
    pub order_status: Option<String>,
    pub order_total: Option<Money>,
    pub ship_service_level: Option<String>,
    pub buyer_info: Option<BuyerInfo>,
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Money {
    pub currency_code: Option<String>,
    /// A decimal number, as a string, e.g. "25.99"
    pub amount: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuyerInfo {
    pub buyer_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShippingAddress {
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub state_or_region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

/// One page of orders, plus the cursor for the next page, if there is one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersPage {
    pub orders: Vec<AmazonOrder>,
    pub next_token: Option<String>,
}

/// The envelope around a `getOrders` response: `{ "payload": { "Orders": [...], "NextToken": "..." } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OrdersResponse {
    pub payload: Option<OrdersPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OrdersPayload {
    /// Missing and `null` both mean "no orders"
    #[serde(rename = "Orders")]
    pub orders: Option<Vec<AmazonOrder>>,
    #[serde(rename = "NextToken")]
    pub next_token: Option<String>,
}

impl From<OrdersResponse> for OrdersPage {
    fn from(response: OrdersResponse) -> Self {
        let payload = response.payload.unwrap_or_default();
        // An empty cursor means the same thing as a missing one
        let next_token = payload.next_token.filter(|t| !t.is_empty());
        Self { orders: payload.orders.unwrap_or_default(), next_token }
    }
}

/// The fixed parameters of an orders query. Only the cursor changes from page to page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersQuery {
    pub marketplace_id: String,
    /// ISO-8601 date (or date-time). Only orders created after this are returned.
    pub created_after: String,
    pub page_size: u32,
}

impl OrdersQuery {
    /// Creates a new query. Page sizes outside of `1..=MAX_RESULTS_PER_PAGE` are replaced with the maximum.
    pub fn new(marketplace_id: &str, created_after: &str, page_size: u32) -> Self {
        let page_size = if (1..=MAX_RESULTS_PER_PAGE).contains(&page_size) {
            page_size
        } else {
            warn!("📦️ Page size {page_size} is out of range. Using {MAX_RESULTS_PER_PAGE} instead.");
            MAX_RESULTS_PER_PAGE
        };
        Self { marketplace_id: marketplace_id.to_string(), created_after: created_after.to_string(), page_size }
    }
}
