//! # SP-API tools
//!
//! A small client for the parts of the Amazon Selling Partner API that the order sync needs:
//! * exchanging a Login-with-Amazon refresh token for a short-lived access token ([`SpApi::access_token`]), and
//! * fetching a single page of orders from the Orders API ([`SpApi::fetch_orders_page`]).
//!
//! Pagination is left to the caller. Each page carries the opaque `NextToken` cursor that must be passed back to fetch
//! the following page.
mod api;
mod config;
mod data_objects;
mod error;

pub mod helpers;

pub use api::{SpApi, ACCESS_TOKEN_HEADER};
pub use config::{SpApiConfig, SpApiCredentials, DEFAULT_ORDERS_ENDPOINT, DEFAULT_TOKEN_ENDPOINT};
pub use data_objects::{
    AmazonOrder,
    BuyerInfo,
    Money,
    OrdersPage,
    OrdersQuery,
    ShippingAddress,
    DEFAULT_MARKETPLACE_ID,
    MAX_RESULTS_PER_PAGE,
};
pub use error::SpApiError;
