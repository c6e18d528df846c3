//! Integration tests for Flamegrill.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p flamegrill-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_assignment` - eligibility resolution and distance ranking for
//!   the manager dashboard
//! - `order_payloads` - order-creation payload contract
//!
//! The tests in this crate exercise the server's logic across crate
//! boundaries without requiring a live database or geocoding provider;
//! anything that needs real collaborators stays in a deployment's smoke
//! tests.
