//! Geocoding provider client.
//!
//! Resolves a free-form address to coordinates via the provider's HTTP API.
//! The provider returns candidates ordered by relevance; the first one wins.
//! An empty candidate list is a legitimate "no result", distinct from
//! transport or parse failures.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use flamegrill_core::Coordinates;

use crate::config::GeocoderConfig;

/// Errors that can occur when calling the geocoding provider.
#[derive(Debug, Error)]
pub enum GeocoderError {
    /// HTTP request failed (transport error or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the provider response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the external geocoding provider.
#[derive(Clone)]
pub struct GeocoderClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl GeocoderClient {
    /// Create a new geocoder client.
    ///
    /// The credential and request timeout come from configuration; the
    /// timeout bounds dashboard latency when several uncached addresses must
    /// be resolved in one render.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocoderError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Resolve an address to coordinates.
    ///
    /// Returns `Ok(None)` when the provider finds no candidate for the
    /// address; callers store that as a failed lookup rather than surfacing
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or a
    /// malformed response payload.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocoderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("geocode", address),
                ("apikey", self.api_key.expose_secret()),
                ("format", "json"),
            ])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocoderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocoderError::Parse(e.to_string()))?;

        let Some(candidate) = body.response.collection.members.into_iter().next() else {
            return Ok(None);
        };

        parse_pos(&candidate.geo_object.point.pos).map(Some)
    }
}

/// Parse the provider's "longitude latitude" coordinate string, swapping to
/// the conventional latitude/longitude order.
fn parse_pos(pos: &str) -> Result<Coordinates, GeocoderError> {
    let mut parts = pos.split_whitespace();
    let lon = parts.next().and_then(|v| v.parse::<f64>().ok());
    let lat = parts.next().and_then(|v| v.parse::<f64>().ok());

    match (lat, lon) {
        (Some(latitude), Some(longitude)) if parts.next().is_none() => {
            Ok(Coordinates::new(latitude, longitude))
        }
        _ => Err(GeocoderError::Parse(format!(
            "malformed coordinate pair: '{pos}'"
        ))),
    }
}

/// Top-level provider response.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    response: GeocodeBody,
}

#[derive(Debug, Deserialize)]
struct GeocodeBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    members: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point")]
    point: Point,
}

#[derive(Debug, Deserialize)]
struct Point {
    pos: String,
}
