use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrderRow, OrderId, OrderRow},
    traits::OrderStoreError,
};

const ORDER_COLUMNS: &str = "AmazonOrderId, PurchaseDate, OrderStatus, OrderTotalAmount, CurrencyCode, \
                             ShipServiceLevel, BuyerEmail, ShippingAddress1, City, StateOrRegion, PostalCode, \
                             CountryCode, ChangeDate";

/// Inserts a new order using the given connection. `ChangeDate` is set to the database's current timestamp.
///
/// An existing order with the same id results in [`OrderStoreError::DuplicateOrder`]. A unique-key violation raised by
/// the insert itself is reported the same way.
pub async fn insert_order(order: NewOrderRow, conn: &mut SqliteConnection) -> Result<(), OrderStoreError> {
    if order_exists(&order.amazon_order_id, conn).await? {
        return Err(OrderStoreError::DuplicateOrder(order.amazon_order_id));
    }
    let result = sqlx::query(
        r#"
            INSERT INTO Orders (
                AmazonOrderId,
                PurchaseDate,
                OrderStatus,
                OrderTotalAmount,
                CurrencyCode,
                ShipServiceLevel,
                BuyerEmail,
                ShippingAddress1,
                City,
                StateOrRegion,
                PostalCode,
                CountryCode,
                ChangeDate
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, CURRENT_TIMESTAMP);
        "#,
    )
    .bind(&order.amazon_order_id)
    .bind(order.purchase_date)
    .bind(&order.order_status)
    .bind(&order.order_total_amount)
    .bind(&order.currency_code)
    .bind(&order.ship_service_level)
    .bind(&order.buyer_email)
    .bind(&order.shipping_address1)
    .bind(&order.city)
    .bind(&order.state_or_region)
    .bind(&order.postal_code)
    .bind(&order.country_code)
    .execute(conn)
    .await;
    match result {
        Ok(_) => {
            trace!("🗃️ Order {} inserted", order.amazon_order_id);
            Ok(())
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(OrderStoreError::DuplicateOrder(order.amazon_order_id))
        },
        Err(e) => Err(e.into()),
    }
}

/// Returns the order with the given `AmazonOrderId`, or `None` if it has not been stored.
pub async fn fetch_order(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<OrderRow>, OrderStoreError> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM Orders WHERE AmazonOrderId = $1");
    let order = sqlx::query_as::<_, OrderRow>(&sql).bind(order_id).fetch_optional(conn).await?;
    Ok(order)
}

/// Checks whether the order with the given `OrderId` already exists in the database.
pub async fn order_exists(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<bool, OrderStoreError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Orders WHERE AmazonOrderId = $1")
        .bind(order_id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

/// Fetches all orders, in the order they were inserted.
pub async fn fetch_orders(conn: &mut SqliteConnection) -> Result<Vec<OrderRow>, OrderStoreError> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM Orders ORDER BY rowid ASC");
    let orders = sqlx::query_as::<_, OrderRow>(&sql).fetch_all(conn).await?;
    trace!("🗃️ Result of fetch_orders: {}", orders.len());
    Ok(orders)
}

pub async fn order_count(conn: &mut SqliteConnection) -> Result<i64, OrderStoreError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Orders").fetch_one(conn).await?;
    Ok(count)
}
