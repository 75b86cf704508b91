//! Google Places REST client.
//!
//! Talks to the legacy JSON web service:
//! - **Place details** (`/details/json`): resolves a place id to a coordinate
//! - **Nearby search** (`/nearbysearch/json`): keyword search around a point
//!
//! Provider status codes are interpreted here so callers only see "no such
//! place", an ordered result list, or an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::dto::{
    DetailsResponse, NearbyResponse, STATUS_INVALID_REQUEST, STATUS_NOT_FOUND, STATUS_OK,
    STATUS_ZERO_RESULTS,
};
use super::settings::{PlacesConfig, API_KEY_ENV};
use crate::domain::{geo::Coordinate, id::PlaceId};
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::places::{NearbyPlace, NearbySearch, PlaceDetails, PlaceLookup};

/// HTTP client for the Google Places web service.
pub struct GooglePlacesClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl GooglePlacesClient {
    /// Create a client with default transport settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
        }
    }

    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when no API key was loaded.
    pub fn from_config(config: &PlacesConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ConfigError::MissingField {
                field: API_KEY_ENV,
            })?;
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key,
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    async fn get_with_retry<T>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = self
                .http
                .get(&url)
                .query(params)
                .query(&[("key", self.api_key.as_str())])
                .send()
                .await;
            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.without_url().into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = match response.error_for_status() {
                Ok(response) => response,
                Err(err) => return Err(err.without_url().into()),
            };

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.without_url().into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "Places request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

/// Map a details response onto the port's answer.
///
/// # Errors
///
/// Returns [`Error::Provider`] for statuses other than success or "unknown
/// place".
pub fn interpret_details(place_id: &PlaceId, response: DetailsResponse) -> Result<Option<PlaceDetails>> {
    match response.status.as_str() {
        STATUS_OK => {}
        STATUS_NOT_FOUND | STATUS_ZERO_RESULTS | STATUS_INVALID_REQUEST => return Ok(None),
        other => return Err(provider_error(other, response.error_message)),
    }

    Ok(response.result.and_then(|result| {
        result.geometry.map(|geometry| PlaceDetails {
            place_id: place_id.clone(),
            name: result.name,
            location: Coordinate::new(geometry.location.lat, geometry.location.lng),
        })
    }))
}

/// Map a nearby search response onto an ordered result list.
///
/// Geographic results are dropped; the remaining order is preserved.
///
/// # Errors
///
/// Returns [`Error::Provider`] for statuses other than `OK` and
/// `ZERO_RESULTS`.
pub fn interpret_nearby(response: NearbyResponse) -> Result<Vec<NearbyPlace>> {
    match response.status.as_str() {
        STATUS_OK => {}
        STATUS_ZERO_RESULTS => return Ok(Vec::new()),
        other => return Err(provider_error(other, response.error_message)),
    }

    Ok(response
        .results
        .into_iter()
        .filter(|r| !r.is_geographic())
        .map(|r| NearbyPlace {
            place_id: PlaceId::from(r.place_id),
            name: r.name,
            rating: r.rating,
            user_ratings_total: r.user_ratings_total,
        })
        .collect())
}

fn provider_error(status: &str, message: Option<String>) -> Error {
    match message {
        Some(message) => Error::Provider(format!("{status}: {message}")),
        None => Error::Provider(status.to_string()),
    }
}

#[async_trait]
impl PlaceLookup for GooglePlacesClient {
    async fn get_place_details(&self, place_id: &PlaceId) -> Result<Option<PlaceDetails>> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", "name,geometry".to_string()),
        ];
        let response: DetailsResponse = self.get_with_retry("details/json", &params).await?;
        debug!(place_id = %place_id, status = %response.status, "Fetched place details");
        interpret_details(place_id, response)
    }

    fn provider_name(&self) -> &'static str {
        "Google Places"
    }
}

#[async_trait]
impl NearbySearch for GooglePlacesClient {
    async fn search_nearby(
        &self,
        location: Coordinate,
        keyword: &str,
        radius_meters: u32,
    ) -> Result<Vec<NearbyPlace>> {
        let params = [
            ("location", location.to_string()),
            ("radius", radius_meters.to_string()),
            ("keyword", keyword.to_string()),
        ];
        let response: NearbyResponse = self.get_with_retry("nearbysearch/json", &params).await?;
        let results = interpret_nearby(response)?;
        debug!(location = %location, count = results.len(), "Nearby search returned");
        Ok(results)
    }

    fn provider_name(&self) -> &'static str {
        "Google Places"
    }
}
