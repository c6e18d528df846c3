//! Integration tests for the order-creation payload contract.
//!
//! Exercises deserialization of the public API payload and the shape of
//! validation error responses, without running an HTTP server.

use flamegrill_core::{PaymentMethod, Phone};
use flamegrill_server::error::ValidationError;
use flamegrill_server::routes::orders::CreateOrderRequest;

#[test]
fn test_full_payload_deserializes() {
    let json = r#"{
        "firstname": "Ivan",
        "lastname": "Petrov",
        "phonenumber": "+7 (999) 123-45-67",
        "address": "Tverskaya 1, Moscow",
        "comment": "door code 1234",
        "payment": "online",
        "products": [
            {"product": 1, "quantity": 2},
            {"product": 2, "quantity": 1}
        ]
    }"#;

    let req: CreateOrderRequest = serde_json::from_str(json).expect("payload should parse");
    assert_eq!(req.firstname, "Ivan");
    assert_eq!(req.payment, Some(PaymentMethod::Online));
    assert_eq!(req.products.len(), 2);
    assert_eq!(req.products[0].product, 1);
    assert_eq!(req.products[0].quantity, 2);
}

#[test]
fn test_minimal_payload_defaults() {
    let json = r#"{
        "firstname": "Ivan",
        "lastname": "Petrov",
        "phonenumber": "+79991234567",
        "address": "Tverskaya 1",
        "products": [{"product": 1, "quantity": 500}]
    }"#;

    let req: CreateOrderRequest = serde_json::from_str(json).expect("payload should parse");
    assert!(req.payment.is_none());
    assert!(req.comment.is_empty());
}

#[test]
fn test_unknown_payment_method_is_rejected_at_parse() {
    let json = r#"{
        "firstname": "Ivan",
        "lastname": "Petrov",
        "phonenumber": "+79991234567",
        "address": "Tverskaya 1",
        "payment": "barter",
        "products": [{"product": 1, "quantity": 1}]
    }"#;

    assert!(serde_json::from_str::<CreateOrderRequest>(json).is_err());
}

#[test]
fn test_validation_error_body_shape() {
    let mut err = ValidationError::new();
    err.push("products", "must not be empty");
    err.push("products[0].quantity", "must be between 1 and 500");

    let body = serde_json::to_value(&err).expect("serialize");
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "products");
    assert_eq!(errors[1]["field"], "products[0].quantity");
}

#[test]
fn test_phone_normalization_round_trip() {
    // The stored phone form is what order confirmations echo back
    let phone = Phone::parse("8 (999) 123-45-67").expect("valid phone");
    assert_eq!(phone.as_str(), "89991234567");
}
