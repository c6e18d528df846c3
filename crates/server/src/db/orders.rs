//! Order repository.
//!
//! Order creation inserts the order row and every line item inside one
//! transaction; readers never observe a partial order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use flamegrill_core::{
    OrderId, OrderItemId, OrderStatus, PaymentMethod, Phone, Price, ProductId, RestaurantId,
};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order, OrderItem, OrderWithItems};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    firstname: String,
    lastname: String,
    phonenumber: String,
    address: String,
    status: String,
    payment: String,
    comment: String,
    restaurant_id: Option<i64>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    quantity: i32,
    price: rust_decimal::Decimal,
}

impl OrderRow {
    fn into_domain(self) -> Result<Order, RepositoryError> {
        let phonenumber = Phone::parse(&self.phonenumber).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid phone number in order {}: {e}",
                self.id
            ))
        })?;
        let status: OrderStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in order {}: {e}", self.id))
        })?;
        let payment: PaymentMethod = self.payment.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment in order {}: {e}", self.id))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            firstname: self.firstname,
            lastname: self.lastname,
            phonenumber,
            address: self.address,
            status,
            payment,
            comment: self.comment,
            restaurant_id: self.restaurant_id.map(RestaurantId::new),
            created_at: self.created_at,
        })
    }
}

impl OrderItemRow {
    fn into_domain(self) -> Result<OrderItem, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity in order item {}",
                self.id
            ))
        })?;
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in order item {}: {e}", self.id))
        })?;

        Ok(OrderItem {
            id: OrderItemId::new(self.id),
            order_id: OrderId::new(self.order_id),
            product_id: ProductId::new(self.product_id),
            quantity,
            price,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its line items atomically.
    ///
    /// Current product prices are read inside the same transaction and
    /// snapshotted onto the items. Any failure rolls the whole order back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if a referenced product does not
    /// exist. Returns `RepositoryError::Database` for other failures; in
    /// every error case nothing is committed.
    pub async fn create(&self, new_order: &NewOrder) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (firstname, lastname, phonenumber, address, status, payment, comment)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, firstname, lastname, phonenumber, address, status, payment, comment,
                      restaurant_id, created_at
            ",
        )
        .bind(&new_order.firstname)
        .bind(&new_order.lastname)
        .bind(new_order.phonenumber.as_str())
        .bind(&new_order.address)
        .bind(OrderStatus::default().as_str())
        .bind(new_order.payment.as_str())
        .bind(&new_order.comment)
        .fetch_one(&mut *tx)
        .await?;

        let order = order_row.into_domain()?;

        let mut items = Vec::with_capacity(new_order.items.len());
        for line in &new_order.items {
            let item_row = sqlx::query_as::<_, OrderItemRow>(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                SELECT $1, p.id, $3, p.price
                FROM products p
                WHERE p.id = $2
                RETURNING id, order_id, product_id, quantity, price
                ",
            )
            .bind(order.id.as_i64())
            .bind(line.product_id.as_i64())
            .bind(i32::try_from(line.quantity).map_err(|_| {
                RepositoryError::DataCorruption("quantity exceeds i32".to_owned())
            })?)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepositoryError::NotFound)?;

            items.push(item_row.into_domain()?);
        }

        tx.commit().await?;

        Ok(OrderWithItems { order, items })
    }

    /// All orders that have not yet been delivered, oldest first, with
    /// their line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn active_with_items(&self) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let order_rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, firstname, lastname, phonenumber, address, status, payment, comment,
                   restaurant_id, created_at
            FROM orders
            WHERE status <> $1
            ORDER BY id
            ",
        )
        .bind(OrderStatus::Delivered.as_str())
        .fetch_all(self.pool)
        .await?;

        let order_ids: Vec<i64> = order_rows.iter().map(|r| r.id).collect();

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            let order_id = row.order_id;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(row.into_domain()?);
        }

        order_rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                Ok(OrderWithItems {
                    order: row.into_domain()?,
                    items,
                })
            })
            .collect()
    }
}
