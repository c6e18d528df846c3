//! HTTP route handlers for the server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (verifies database)
//!
//! # Orders
//! POST /api/orders          - Create an order (storefront-facing)
//!
//! # Manager dashboard
//! GET  /api/manager/orders  - Active orders with eligible restaurants
//!                             and distances (consumed by the rendering
//!                             layer)
//! ```

pub mod manager;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application router (health endpoints are mounted in `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", post(orders::create))
        .route("/api/manager/orders", get(manager::list_orders))
}
