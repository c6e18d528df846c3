//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use flamegrill_core::{
    OrderId, OrderItemId, OrderStatus, PaymentMethod, Phone, Price, ProductId, RestaurantId,
};

/// A customer order.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer first name.
    pub firstname: String,
    /// Customer last name.
    pub lastname: String,
    /// Normalized contact phone.
    pub phonenumber: Phone,
    /// Delivery address as entered by the customer.
    pub address: String,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Payment method chosen at creation.
    pub payment: PaymentMethod,
    /// Optional manager comment.
    pub comment: String,
    /// Restaurant assigned to cook the order, if any.
    pub restaurant_id: Option<RestaurantId>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// One product line of an order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Database ID of this line.
    pub id: OrderItemId,
    /// Order this line belongs to.
    pub order_id: OrderId,
    /// Ordered product.
    pub product_id: ProductId,
    /// Quantity in [1, 500].
    pub quantity: u32,
    /// Price per unit snapshotted at order time.
    pub price: Price,
}

/// A validated order ready to be persisted.
///
/// Produced by the order-creation route after payload validation; the
/// repository snapshots current product prices while inserting.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Customer first name.
    pub firstname: String,
    /// Customer last name.
    pub lastname: String,
    /// Normalized contact phone.
    pub phonenumber: Phone,
    /// Delivery address.
    pub address: String,
    /// Payment method.
    pub payment: PaymentMethod,
    /// Optional manager comment.
    pub comment: String,
    /// Line items; validated non-empty.
    pub items: Vec<NewOrderItem>,
}

/// One line of a [`NewOrder`].
#[derive(Debug, Clone, Copy)]
pub struct NewOrderItem {
    /// Ordered product.
    pub product_id: ProductId,
    /// Quantity, validated to [1, 500].
    pub quantity: u32,
}

/// An order together with its line items.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    /// The order.
    pub order: Order,
    /// Its line items; never empty for a committed order.
    pub items: Vec<OrderItem>,
}

impl OrderWithItems {
    /// Total amount of the order from snapshotted line prices.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price.times(item.quantity))
            .sum()
    }

    /// Product IDs referenced by this order's lines.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|item| item.product_id).collect()
    }
}
