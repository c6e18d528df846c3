//! Order creation route handlers.
//!
//! Accepts order payloads from the storefront, validates them field by
//! field, and persists order plus line items in one transaction. Confirmed
//! fields are echoed back; they are read-only after creation.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use flamegrill_core::{OrderId, OrderStatus, PaymentMethod, Phone, ProductId};

use crate::db::{CatalogRepository, OrderRepository, RepositoryError};
use crate::error::{AppError, Result, ValidationError};
use crate::models::order::{NewOrder, NewOrderItem, OrderWithItems};
use crate::state::AppState;

/// Inclusive quantity bounds for one order line.
const QUANTITY_RANGE: std::ops::RangeInclusive<i64> = 1..=500;

/// One line of an incoming order payload.
#[derive(Debug, Deserialize)]
pub struct OrderItemPayload {
    /// Product ID.
    pub product: i64,
    /// Requested quantity.
    pub quantity: i64,
}

/// Incoming order payload.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    #[serde(default)]
    pub comment: String,
    /// Payment method; defaults to cash on delivery.
    pub payment: Option<PaymentMethod>,
    pub products: Vec<OrderItemPayload>,
}

impl CreateOrderRequest {
    /// Field-level validation that needs no catalog access.
    fn validate(&self) -> std::result::Result<Phone, ValidationError> {
        let mut errors = ValidationError::new();

        if self.firstname.trim().is_empty() {
            errors.push("firstname", "must not be empty");
        }
        if self.lastname.trim().is_empty() {
            errors.push("lastname", "must not be empty");
        }
        if self.address.trim().is_empty() {
            errors.push("address", "must not be empty");
        }

        let phone = match Phone::parse(&self.phonenumber) {
            Ok(phone) => Some(phone),
            Err(e) => {
                errors.push("phonenumber", e.to_string());
                None
            }
        };

        if self.products.is_empty() {
            errors.push("products", "must not be empty");
        }
        for (index, item) in self.products.iter().enumerate() {
            if !QUANTITY_RANGE.contains(&item.quantity) {
                errors.push(
                    format!("products[{index}].quantity"),
                    "must be between 1 and 500",
                );
            }
        }

        errors.into_result()?;
        // Phone is Some whenever no error was recorded for it.
        phone.ok_or_else(|| ValidationError::single("phonenumber", "not a phone number"))
    }
}

/// One confirmed order line.
#[derive(Debug, Serialize)]
pub struct OrderItemConfirmation {
    pub product: ProductId,
    pub quantity: u32,
}

/// Confirmed order fields returned to the client.
#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    pub id: OrderId,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub comment: String,
    pub status: OrderStatus,
    pub payment: PaymentMethod,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub products: Vec<OrderItemConfirmation>,
}

impl From<OrderWithItems> for OrderConfirmation {
    fn from(created: OrderWithItems) -> Self {
        let total_amount = created.total_amount();
        let OrderWithItems { order, items } = created;
        Self {
            id: order.id,
            firstname: order.firstname,
            lastname: order.lastname,
            phonenumber: order.phonenumber.into_inner(),
            address: order.address,
            comment: order.comment,
            status: order.status,
            payment: order.payment,
            total_amount,
            created_at: order.created_at,
            products: items
                .into_iter()
                .map(|item| OrderItemConfirmation {
                    product: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Create an order.
///
/// Rejects the payload with field-level detail (HTTP 422) when the item
/// list is empty, a quantity is out of range, the phone number is invalid,
/// or a product is unknown or not available at any restaurant. On success
/// the order and all its items are committed atomically.
#[instrument(skip(state, payload), fields(items = payload.products.len()))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderConfirmation>)> {
    let phonenumber = payload.validate()?;

    // Products must currently be available at one restaurant or more.
    let catalog = CatalogRepository::new(state.pool());
    let available = catalog.available_product_ids().await?;

    let mut errors = ValidationError::new();
    for (index, item) in payload.products.iter().enumerate() {
        if !available.contains(&ProductId::new(item.product)) {
            errors.push(
                format!("products[{index}].product"),
                format!("product {} is not available", item.product),
            );
        }
    }
    errors.into_result().map_err(AppError::Validation)?;

    let new_order = NewOrder {
        firstname: payload.firstname.trim().to_owned(),
        lastname: payload.lastname.trim().to_owned(),
        phonenumber,
        address: payload.address.trim().to_owned(),
        payment: payload.payment.unwrap_or(PaymentMethod::Cash),
        comment: payload.comment,
        items: payload
            .products
            .iter()
            .map(|item| NewOrderItem {
                product_id: ProductId::new(item.product),
                // Validated to [1, 500] above
                quantity: u32::try_from(item.quantity).unwrap_or(1),
            })
            .collect(),
    };

    let created = OrderRepository::new(state.pool())
        .create(&new_order)
        .await
        .map_err(|e| match e {
            // A product vanished between validation and insert.
            RepositoryError::NotFound => AppError::Validation(ValidationError::single(
                "products",
                "a product in the order no longer exists",
            )),
            other => AppError::Database(other),
        })?;

    tracing::info!(order_id = %created.order.id, "order created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(products: Vec<OrderItemPayload>) -> CreateOrderRequest {
        CreateOrderRequest {
            firstname: "Ivan".to_owned(),
            lastname: "Petrov".to_owned(),
            phonenumber: "+7 999 123-45-67".to_owned(),
            address: "Tverskaya 1, Moscow".to_owned(),
            comment: String::new(),
            payment: Some(PaymentMethod::Cash),
            products,
        }
    }

    fn line(product: i64, quantity: i64) -> OrderItemPayload {
        OrderItemPayload { product, quantity }
    }

    #[test]
    fn test_validate_accepts_quantity_bounds() {
        assert!(request(vec![line(1, 1)]).validate().is_ok());
        assert!(request(vec![line(1, 500)]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_quantity() {
        let err = request(vec![line(1, 501)]).validate().unwrap_err();
        assert_eq!(err.errors[0].field, "products[0].quantity");

        let err = request(vec![line(1, 0)]).validate().unwrap_err();
        assert_eq!(err.errors[0].field, "products[0].quantity");
    }

    #[test]
    fn test_validate_rejects_empty_item_list() {
        let err = request(vec![]).validate().unwrap_err();
        assert!(err.errors.iter().any(|e| e.field == "products"));
    }

    #[test]
    fn test_validate_rejects_bad_phone() {
        let mut req = request(vec![line(1, 2)]);
        req.phonenumber = "not a phone".to_owned();
        let err = req.validate().unwrap_err();
        assert!(err.errors.iter().any(|e| e.field == "phonenumber"));
    }

    #[test]
    fn test_validate_collects_multiple_errors() {
        let mut req = request(vec![line(1, 501), line(2, 3)]);
        req.firstname = String::new();
        let err = req.validate().unwrap_err();

        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"firstname"));
        assert!(fields.contains(&"products[0].quantity"));
        assert!(!fields.contains(&"products[1].quantity"));
    }

    #[test]
    fn test_validate_normalizes_phone() {
        let phone = request(vec![line(1, 1)]).validate().unwrap();
        assert_eq!(phone.as_str(), "+79991234567");
    }

    #[test]
    fn test_payload_deserializes_without_optional_fields() {
        let json = r#"{
            "firstname": "Ivan",
            "lastname": "Petrov",
            "phonenumber": "+79991234567",
            "address": "Tverskaya 1",
            "products": [{"product": 1, "quantity": 2}]
        }"#;
        let req: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert!(req.payment.is_none());
        assert!(req.comment.is_empty());
        assert!(req.validate().is_ok());
    }
}
