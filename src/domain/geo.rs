//! Grid geometry around a business location.
//!
//! Converts a center coordinate, a radius, and a grid resolution into an
//! ordered lattice of sample coordinates using a flat-earth approximation
//! that is accurate enough for city-scale distances.
//!
//! Points are emitted row-major, starting at the north-west corner: row 0 is
//! the northernmost latitude and columns run west to east. Consumers that
//! render a 2-D grid rely on this ordering.
//!
//! No special handling exists for the poles or the antimeridian.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Convert a north-south distance to degrees of latitude.
#[must_use]
pub fn km_to_lat_degrees(distance_km: f64) -> f64 {
    (distance_km / EARTH_RADIUS_KM) * (180.0 / PI)
}

/// Convert an east-west distance to degrees of longitude at `lat`.
///
/// Longitude lines converge toward the poles, so the same distance spans
/// more degrees at higher latitudes.
#[must_use]
pub fn km_to_lng_degrees(distance_km: f64, lat: f64) -> f64 {
    (distance_km / (EARTH_RADIUS_KM * lat.to_radians().cos())) * (180.0 / PI)
}

/// Generate a `grid_size` x `grid_size` lattice centered on `center`.
///
/// The lattice spans `radius_km` in every direction from the center. A
/// `grid_size` of 0 or 1 yields the center alone.
#[must_use]
pub fn generate_grid(center: Coordinate, radius_km: f64, grid_size: u32) -> Vec<Coordinate> {
    if grid_size <= 1 {
        return vec![center];
    }

    let step_km = (2.0 * radius_km) / f64::from(grid_size - 1);
    let lat_step = km_to_lat_degrees(step_km);
    let start_lat = center.lat + km_to_lat_degrees(radius_km);

    let capacity = (grid_size as usize) * (grid_size as usize);
    let mut points = Vec::with_capacity(capacity);

    for row in 0..grid_size {
        let lat = start_lat - f64::from(row) * lat_step;

        // Each row sits at a different latitude, so its longitude spacing differs.
        let lng_step = km_to_lng_degrees(step_km, lat);
        let start_lng = center.lng - km_to_lng_degrees(radius_km, lat);

        for col in 0..grid_size {
            points.push(Coordinate::new(lat, start_lng + f64::from(col) * lng_step));
        }
    }

    points
}

/// Map a row-major position back to its `(row, col)` cell.
#[must_use]
pub const fn grid_cell(position: u32, grid_size: u32) -> (u32, u32) {
    if grid_size == 0 {
        return (0, 0);
    }
    (position / grid_size, position % grid_size)
}
