//! Domain types for the server.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories map rows into them at the query boundary.

pub mod catalog;
pub mod order;
pub mod place;

pub use catalog::{MenuEntry, Product, Restaurant};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderWithItems};
pub use place::Place;
