//! Distance annotation and ordering of eligible restaurants.
//!
//! For the manager dashboard each eligible restaurant is annotated with its
//! distance from the order's delivery address. Addresses that fail to
//! geocode degrade to an unknown distance; names must still render.

use std::cmp::Ordering;

use crate::db::RepositoryError;
use crate::models::catalog::Restaurant;
use crate::services::places::PlaceResolver;

/// An eligible restaurant with its distance from the delivery address.
#[derive(Debug, Clone)]
pub struct RankedRestaurant {
    /// The restaurant.
    pub restaurant: Restaurant,
    /// Distance in kilometers, rounded to 3 decimals; `None` when either
    /// address failed to geocode.
    pub distance_km: Option<f64>,
}

impl RankedRestaurant {
    /// Human-readable annotation for display.
    #[must_use]
    pub fn label(&self) -> String {
        match self.distance_km {
            Some(km) => format!("{} - {km:.3} km", self.restaurant.name),
            None => format!("{} - distance unknown", self.restaurant.name),
        }
    }
}

/// Annotate eligible restaurants with distances and sort them.
///
/// The order address and every restaurant address go through the resolver
/// (cache first, provider at most once per address). If the order address
/// itself is unresolved, every restaurant gets an unknown distance but the
/// input order is preserved.
///
/// # Errors
///
/// Returns `RepositoryError` only for database failures; lookup failures
/// degrade to unknown distances.
pub async fn annotate(
    resolver: &PlaceResolver,
    order_address: &str,
    restaurants: Vec<Restaurant>,
) -> Result<Vec<RankedRestaurant>, RepositoryError> {
    let order_coords = resolver.resolve(order_address).await?;

    let mut ranked = Vec::with_capacity(restaurants.len());
    for restaurant in restaurants {
        let distance_km = match order_coords {
            Some(origin) => resolver
                .resolve(&restaurant.address)
                .await?
                .map(|dest| round_km(origin.distance_km(&dest))),
            None => None,
        };
        ranked.push(RankedRestaurant {
            restaurant,
            distance_km,
        });
    }

    sort_by_distance(&mut ranked);
    Ok(ranked)
}

/// Sort ascending by distance; unknown distances last. The sort is stable,
/// so entries with equal or unknown distances keep their relative order.
pub fn sort_by_distance(ranked: &mut [RankedRestaurant]) {
    ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Round a distance to 3 decimal places for display.
fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use flamegrill_core::RestaurantId;

    use super::*;

    fn ranked(id: i64, name: &str, distance_km: Option<f64>) -> RankedRestaurant {
        RankedRestaurant {
            restaurant: Restaurant {
                id: RestaurantId::new(id),
                name: name.to_owned(),
                address: format!("{name} street 1"),
                contact_phone: String::new(),
            },
            distance_km,
        }
    }

    #[test]
    fn test_sort_ascending_unknown_last() {
        let mut list = vec![
            ranked(1, "Far", Some(12.5)),
            ranked(2, "Unknown A", None),
            ranked(3, "Near", Some(0.8)),
            ranked(4, "Mid", Some(3.2)),
        ];
        sort_by_distance(&mut list);

        let names: Vec<&str> = list.iter().map(|r| r.restaurant.name.as_str()).collect();
        assert_eq!(names, ["Near", "Mid", "Far", "Unknown A"]);
    }

    #[test]
    fn test_sort_stable_among_unknowns() {
        let mut list = vec![
            ranked(1, "Unknown A", None),
            ranked(2, "Unknown B", None),
            ranked(3, "Known", Some(1.0)),
            ranked(4, "Unknown C", None),
        ];
        sort_by_distance(&mut list);

        let names: Vec<&str> = list.iter().map(|r| r.restaurant.name.as_str()).collect();
        assert_eq!(names, ["Known", "Unknown A", "Unknown B", "Unknown C"]);
    }

    #[test]
    fn test_sort_stable_among_equal_distances() {
        let mut list = vec![
            ranked(1, "First", Some(2.0)),
            ranked(2, "Second", Some(2.0)),
            ranked(3, "Closer", Some(1.0)),
        ];
        sort_by_distance(&mut list);

        let names: Vec<&str> = list.iter().map(|r| r.restaurant.name.as_str()).collect();
        assert_eq!(names, ["Closer", "First", "Second"]);
    }

    #[test]
    fn test_round_km() {
        assert!((round_km(1.234_56) - 1.235).abs() < 1e-9);
        assert!((round_km(0.0004) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_label() {
        assert_eq!(ranked(1, "Grill", Some(1.25)).label(), "Grill - 1.250 km");
        assert_eq!(
            ranked(1, "Grill", None).label(),
            "Grill - distance unknown"
        );
    }
}
