//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::geocoder::{GeocoderClient, GeocoderError};
use crate::services::places::PlaceResolver;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    places: PlaceResolver,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `PostgreSQL` connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the geocoder HTTP client fails to build.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, GeocoderError> {
        let geocoder = GeocoderClient::new(&config.geocoder)?;
        let places = PlaceResolver::new(pool.clone(), geocoder);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                places,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the address resolver.
    #[must_use]
    pub fn places(&self) -> &PlaceResolver {
        &self.inner.places
    }
}
