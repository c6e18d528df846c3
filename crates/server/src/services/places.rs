//! Layered geocode cache.
//!
//! Resolution order: in-process moka cache, then the `places` table, then
//! one call to the provider. Whatever the provider returns (including a
//! failure, stored as null coordinates) is persisted and served from cache
//! afterwards; a previously failed address is not retried unless its row is
//! removed out-of-band.

use moka::future::Cache;
use sqlx::PgPool;

use flamegrill_core::Coordinates;

use crate::db::{PlaceRepository, RepositoryError};
use crate::services::geocoder::GeocoderClient;

/// Upper bound on in-process cached addresses.
const CACHE_CAPACITY: u64 = 10_000;

/// Read-through resolver from address to coordinates.
///
/// Cheap to clone; the underlying pool, client, and cache are shared.
#[derive(Clone)]
pub struct PlaceResolver {
    pool: PgPool,
    geocoder: GeocoderClient,
    cache: Cache<String, Option<Coordinates>>,
}

impl PlaceResolver {
    /// Create a new resolver over the given pool and provider client.
    #[must_use]
    pub fn new(pool: PgPool, geocoder: GeocoderClient) -> Self {
        Self {
            pool,
            geocoder,
            cache: Cache::new(CACHE_CAPACITY),
        }
    }

    /// Resolve an address, fetching from the provider at most once per
    /// stored row.
    ///
    /// Returns `None` for addresses whose lookup found nothing or failed;
    /// that outcome is itself cached. Provider errors are logged here and
    /// never propagate, so a single bad address cannot break a dashboard
    /// render.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for database failures.
    pub async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, RepositoryError> {
        if let Some(cached) = self.cache.get(address).await {
            return Ok(cached);
        }

        let repo = PlaceRepository::new(&self.pool);

        if let Some(place) = repo.find(address).await? {
            let coords = place.coordinates();
            self.cache.insert(address.to_owned(), coords).await;
            return Ok(coords);
        }

        // First-time lookup for this address.
        let fetched = match self.geocoder.geocode(address).await {
            Ok(coords) => {
                if coords.is_none() {
                    tracing::info!(address, "geocoder found no result for address");
                }
                coords
            }
            Err(err) => {
                tracing::warn!(address, error = %err, "geocoding lookup failed");
                None
            }
        };

        // Persist whatever we got; a concurrent creator's row wins the race.
        let place = repo.create(address, fetched).await?;
        let coords = place.coordinates();
        self.cache.insert(address.to_owned(), coords).await;

        Ok(coords)
    }
}
