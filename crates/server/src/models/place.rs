//! Geocode cache domain type.

use chrono::{DateTime, Utc};

use flamegrill_core::{Coordinates, PlaceId};

/// A persisted geocoding result for one address.
///
/// The address is the unique key. Null coordinates record a lookup that was
/// attempted but returned no result or failed; such rows are returned as
/// unresolved without re-fetching.
#[derive(Debug, Clone)]
pub struct Place {
    /// Database ID of this cache row.
    pub id: PlaceId,
    /// The address string, matched exactly.
    pub address: String,
    /// Latitude, if the lookup resolved.
    pub latitude: Option<f64>,
    /// Longitude, if the lookup resolved.
    pub longitude: Option<f64>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// The resolved coordinates, or `None` for an unresolved row.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}
