//! Catalog domain types.
//!
//! Restaurants, products, and the menu entries relating them. Catalog rows
//! are administered outside this service; the server reads them to resolve
//! order eligibility and availability.

use flamegrill_core::{CategoryId, MenuEntryId, Price, ProductId, RestaurantId};

/// A restaurant that can be assigned orders.
#[derive(Debug, Clone)]
pub struct Restaurant {
    /// Unique restaurant ID.
    pub id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Street address, geocoded on demand for distance ranking.
    pub address: String,
    /// Contact phone in free form (catalog data, not validated here).
    pub contact_phone: String,
}

/// A product customers can order.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional category; a removed category leaves the product intact.
    pub category_id: Option<CategoryId>,
    /// Current catalog price. Order items snapshot this at order time.
    pub price: Price,
}

/// One restaurant's carry/availability record for one product.
///
/// At most one entry exists per (restaurant, product) pair.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    /// Unique entry ID.
    pub id: MenuEntryId,
    /// Restaurant carrying the product.
    pub restaurant_id: RestaurantId,
    /// The product carried.
    pub product_id: ProductId,
    /// Whether the restaurant can currently prepare the product.
    pub availability: bool,
}
