use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

//--------------------------------------        OrderId        ---------------------------------------------------------
/// The order identifier assigned by the marketplace, e.g. `902-3159896-1390916`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------      NewOrderRow      ---------------------------------------------------------
/// An order, flattened into the columns of the `Orders` table. `ChangeDate` is not part of this struct; the store sets
/// it when the row is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderRow {
    pub amazon_order_id: OrderId,
    pub purchase_date: Option<DateTime<Utc>>,
    pub order_status: Option<String>,
    /// The order total as the decimal string reported upstream, e.g. "25.99"
    pub order_total_amount: Option<String>,
    pub currency_code: Option<String>,
    pub ship_service_level: Option<String>,
    pub buyer_email: Option<String>,
    pub shipping_address1: Option<String>,
    pub city: Option<String>,
    pub state_or_region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

impl NewOrderRow {
    /// A row with only the primary key set.
    pub fn new(amazon_order_id: OrderId) -> Self {
        Self {
            amazon_order_id,
            purchase_date: None,
            order_status: None,
            order_total_amount: None,
            currency_code: None,
            ship_service_level: None,
            buyer_email: None,
            shipping_address1: None,
            city: None,
            state_or_region: None,
            postal_code: None,
            country_code: None,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.order_status = Some(status.to_string());
        self
    }

    pub fn with_total(mut self, amount: &str, currency_code: &str) -> Self {
        self.order_total_amount = Some(amount.to_string());
        self.currency_code = Some(currency_code.to_string());
        self
    }

    pub fn with_purchase_date(mut self, purchase_date: DateTime<Utc>) -> Self {
        self.purchase_date = Some(purchase_date);
        self
    }
}

//--------------------------------------        OrderRow       ---------------------------------------------------------
/// A row of the `Orders` table, as read back from the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct OrderRow {
    pub amazon_order_id: OrderId,
    pub purchase_date: Option<DateTime<Utc>>,
    pub order_status: Option<String>,
    pub order_total_amount: Option<String>,
    pub currency_code: Option<String>,
    pub ship_service_level: Option<String>,
    pub buyer_email: Option<String>,
    pub shipping_address1: Option<String>,
    pub city: Option<String>,
    pub state_or_region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    /// When this system inserted the row
    pub change_date: DateTime<Utc>,
}
