//! Manager dashboard route handlers.
//!
//! Produces the annotated order list consumed by the dashboard rendering
//! layer: every active order with its total and the restaurants able to
//! cook it, ranked by distance from the delivery address.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use flamegrill_core::{OrderId, OrderStatus, PaymentMethod, RestaurantId};

use crate::db::{CatalogRepository, OrderRepository};
use crate::error::Result;
use crate::services::eligibility::eligible_restaurants;
use crate::services::ranking::annotate;
use crate::state::AppState;

/// An eligible restaurant as shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct RankedRestaurantView {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    /// Kilometers rounded to 3 decimals; absent when geocoding failed.
    pub distance_km: Option<f64>,
    /// Display-ready annotation ("Name - 1.234 km").
    pub label: String,
}

/// One dashboard order row.
#[derive(Debug, Serialize)]
pub struct ManagerOrderView {
    pub id: OrderId,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub status: OrderStatus,
    pub payment: PaymentMethod,
    pub comment: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    /// Assigned restaurant, once a manager picks one.
    pub restaurant_id: Option<RestaurantId>,
    /// Restaurants able to cook every item, nearest first.
    pub restaurants: Vec<RankedRestaurantView>,
}

/// List active orders with their eligible restaurants and distances.
///
/// Catalog data is loaded once per render; geocoding goes through the
/// layered cache, so only never-seen addresses cost a provider round trip.
/// Orders whose delivery address cannot be geocoded still render, with
/// unknown distances.
#[instrument(skip(state))]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<ManagerOrderView>>> {
    let catalog = CatalogRepository::new(state.pool());
    let restaurants = catalog.restaurants().await?;
    let menu = catalog.available_menu_entries().await?;
    let orders = OrderRepository::new(state.pool()).active_with_items().await?;

    let mut views = Vec::with_capacity(orders.len());
    for order_with_items in orders {
        let eligible_ids = eligible_restaurants(&order_with_items.product_ids(), &menu);
        let eligible: Vec<_> = restaurants
            .iter()
            .filter(|restaurant| eligible_ids.contains(&restaurant.id))
            .cloned()
            .collect();

        let ranked = annotate(state.places(), &order_with_items.order.address, eligible).await?;

        let total_amount = order_with_items.total_amount();
        let order = order_with_items.order;
        views.push(ManagerOrderView {
            id: order.id,
            firstname: order.firstname,
            lastname: order.lastname,
            phonenumber: order.phonenumber.into_inner(),
            address: order.address,
            status: order.status,
            payment: order.payment,
            comment: order.comment,
            total_amount,
            created_at: order.created_at,
            restaurant_id: order.restaurant_id,
            restaurants: ranked
                .into_iter()
                .map(|r| RankedRestaurantView {
                    label: r.label(),
                    id: r.restaurant.id,
                    name: r.restaurant.name,
                    address: r.restaurant.address,
                    distance_km: r.distance_km,
                })
                .collect(),
        });
    }

    Ok(Json(views))
}
