//! Geographic coordinates and range validation.
//!
//! A `Coordinate` is the (lat, lng) pair the map emits on click and the UI
//! forms collect. For planar math it maps to `Vector2 { x: lng, y: lat }`.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point on the map, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar view: x = lng, y = lat.
    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.lng, self.lat)
    }

    #[inline]
    pub fn from_vec2(v: Vector2<f64>) -> Self {
        Self { lat: v.y, lng: v.x }
    }

    /// Finite and within `[-90, 90] × [-180, 180]` (inclusive).
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Coordinate {
    /// `(lat, lng)`.
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// True if every coordinate is valid (vacuously true for an empty slice).
pub fn are_valid(coords: &[Coordinate]) -> bool {
    coords.iter().all(Coordinate::is_valid)
}

/// Index of the first invalid coordinate, if any.
pub fn first_invalid(coords: &[Coordinate]) -> Option<usize> {
    coords.iter().position(|c| !c.is_valid())
}
