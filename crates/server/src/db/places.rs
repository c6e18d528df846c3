//! Geocode cache repository.
//!
//! One row per address; the address column is UNIQUE. Two callers racing to
//! create the same address are resolved by `ON CONFLICT DO NOTHING` plus a
//! re-read of the winner's row.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use flamegrill_core::{Coordinates, PlaceId};

use super::RepositoryError;
use crate::models::place::Place;

#[derive(sqlx::FromRow)]
struct PlaceRow {
    id: i64,
    address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    updated_at: DateTime<Utc>,
}

impl PlaceRow {
    fn into_domain(self) -> Place {
        Place {
            id: PlaceId::new(self.id),
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            updated_at: self.updated_at,
        }
    }
}

/// Repository for geocode cache rows.
pub struct PlaceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlaceRepository<'a> {
    /// Create a new place repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a cached row by exact address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, address: &str) -> Result<Option<Place>, RepositoryError> {
        let row = sqlx::query_as::<_, PlaceRow>(
            r"
            SELECT id, address, latitude, longitude, updated_at
            FROM places
            WHERE address = $1
            ",
        )
        .bind(address)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(PlaceRow::into_domain))
    }

    /// Persist a first-time lookup result for an address.
    ///
    /// If another caller created the row concurrently, their result wins and
    /// is returned unchanged; a lost race is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::Conflict` if the winner's row disappears
    /// between the insert and the re-read (deleted out-of-band).
    pub async fn create(
        &self,
        address: &str,
        coordinates: Option<Coordinates>,
    ) -> Result<Place, RepositoryError> {
        let inserted = sqlx::query_as::<_, PlaceRow>(
            r"
            INSERT INTO places (address, latitude, longitude)
            VALUES ($1, $2, $3)
            ON CONFLICT (address) DO NOTHING
            RETURNING id, address, latitude, longitude, updated_at
            ",
        )
        .bind(address)
        .bind(coordinates.map(|c| c.latitude))
        .bind(coordinates.map(|c| c.longitude))
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok(row.into_domain());
        }

        // Lost the creation race: re-read the existing row.
        self.find(address).await?.ok_or_else(|| {
            RepositoryError::Conflict(format!("place row for '{address}' vanished during create"))
        })
    }
}
