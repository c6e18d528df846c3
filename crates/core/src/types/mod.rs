//! Core types for Flamegrill.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod geo;
pub mod id;
pub mod money;
pub mod phone;
pub mod status;

pub use geo::Coordinates;
pub use id::*;
pub use money::{Price, PriceError};
pub use phone::{Phone, PhoneError};
pub use status::*;
