use chrono::{DateTime, Utc};
use log::*;
use order_sync_engine::{
    db_types::{NewOrderRow, OrderId},
    OrderMappingError,
};
use osync_common::helpers::non_blank;
use sp_api_tools::{helpers::parse_sp_api_timestamp, AmazonOrder, BuyerInfo, Money, ShippingAddress};

/// Flattens an SP-API order into a row of the `Orders` table.
///
/// Missing nested objects (`OrderTotal`, `BuyerInfo`, `ShippingAddress`) leave their columns empty. A `PurchaseDate`
/// that can't be parsed is dropped with a warning. The only hard requirement is an `AmazonOrderId`.
pub fn map_order(order: AmazonOrder) -> Result<NewOrderRow, OrderMappingError> {
    trace!("Converting AmazonOrder to NewOrderRow: {order:?}");
    let id = non_blank(order.amazon_order_id)
        .ok_or_else(|| OrderMappingError::new("The order does not have an AmazonOrderId"))?;
    let purchase_date = parse_timestamp(&id, "PurchaseDate", order.purchase_date.as_deref());
    let last_update_date = parse_timestamp(&id, "LastUpdateDate", order.last_update_date.as_deref());
    let Money { currency_code, amount } = order.order_total.unwrap_or_default();
    let BuyerInfo { buyer_email } = order.buyer_info.unwrap_or_default();
    let ShippingAddress { address_line1, city, state_or_region, postal_code, country_code } =
        order.shipping_address.unwrap_or_default();
    info!(
        "📦️ Order {id}. Purchased: {}. Status: {}. Total: {} {}. Ship to: {}, {}, {}. Last updated: {}",
        display_date(purchase_date),
        display(&order.order_status),
        display(&amount),
        display(&currency_code),
        display(&city),
        display(&state_or_region),
        display(&country_code),
        display_date(last_update_date),
    );
    Ok(NewOrderRow {
        amazon_order_id: OrderId(id),
        purchase_date,
        order_status: order.order_status,
        order_total_amount: amount,
        currency_code,
        ship_service_level: order.ship_service_level,
        buyer_email,
        shipping_address1: address_line1,
        city,
        state_or_region,
        postal_code,
        country_code,
    })
}

fn parse_timestamp(id: &str, field: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    let result = parse_sp_api_timestamp(value);
    if result.is_none() {
        warn!("📦️ Order {id} has an invalid {field} ({value}). It will be stored without one.");
    }
    result
}

fn display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn display_date(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.to_rfc3339()).unwrap_or_else(|| "-".to_string())
}
