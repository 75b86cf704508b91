//! Google Places web service response types.
//!
//! Only the fields the grid engine reads are modeled.
//!
//! Example nearby search response:
//! ```json
//! {"status":"OK","results":[{"place_id":"ChIJ...","name":"Smile Dental","types":["dentist"],"vicinity":"Main St","rating":4.7,"user_ratings_total":120}]}
//! ```

use serde::Deserialize;

/// Status returned when a request succeeded with results.
pub const STATUS_OK: &str = "OK";
/// Status returned when a request succeeded without results.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
/// Status returned when a place id is unknown.
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";
/// Status returned for malformed requests, including invalid place ids.
pub const STATUS_INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Place details response envelope.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<DetailsResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Nearby search response envelope.
#[derive(Debug, Deserialize)]
pub struct NearbyResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyResult {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

impl NearbyResult {
    /// True for purely geographic results (cities, regions, streets).
    #[must_use]
    pub fn is_geographic(&self) -> bool {
        self.types
            .iter()
            .any(|t| matches!(t.as_str(), "locality" | "political" | "route"))
    }
}
