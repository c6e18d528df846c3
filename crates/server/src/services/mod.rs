//! Domain services.
//!
//! - [`eligibility`] - which restaurants can fulfill an order (pure)
//! - [`geocoder`] - client for the external geocoding provider
//! - [`places`] - layered geocode cache (in-process, database, provider)
//! - [`ranking`] - distance annotation and ordering of eligible restaurants

pub mod eligibility;
pub mod geocoder;
pub mod places;
pub mod ranking;

pub use eligibility::eligible_restaurants;
pub use geocoder::{GeocoderClient, GeocoderError};
pub use places::PlaceResolver;
pub use ranking::{RankedRestaurant, annotate};
