//! Bounds, centers and distances for coordinate lists.
//!
//! - `Bounds`: axis-aligned lat/lng box the map can be fitted to.
//! - `center`: arithmetic mean of a point list (not the area centroid).
//! - `distance_m`: haversine great-circle distance.

use serde::{Deserialize, Serialize};

use crate::cfg::{DEFAULT_CENTER, EARTH_RADIUS_M, ZOOM_100M};
use crate::coord::Coordinate;

/// Axis-aligned lat/lng box.
///
/// Invariant: `south_west.lat <= north_east.lat` and `south_west.lng <= north_east.lng`.
/// Antimeridian wrap is not modelled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Degenerate box around a single point.
    pub fn around(p: Coordinate) -> Self {
        Self {
            south_west: p,
            north_east: p,
        }
    }

    /// Smallest box containing every coordinate; `None` for an empty list.
    pub fn from_coords(coords: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut b = Self::around(*first);
        for p in rest {
            b.extend(*p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    /// Midpoint of the box (differs from `center` for uneven point clouds).
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            0.5 * (self.south_west.lat + self.north_east.lat),
            0.5 * (self.south_west.lng + self.north_east.lng),
        )
    }

    pub fn contains(&self, p: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&p.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&p.lng)
    }
}

/// Mean of lat and lng; `DEFAULT_CENTER` for an empty list.
pub fn center(coords: &[Coordinate]) -> Coordinate {
    if coords.is_empty() {
        return DEFAULT_CENTER;
    }
    let n = coords.len() as f64;
    let (lat, lng) = coords
        .iter()
        .fold((0.0, 0.0), |(lat, lng), c| (lat + c.lat, lng + c.lng));
    Coordinate::new(lat / n, lng / n)
}

/// Haversine distance in metres.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Zoom level showing roughly a 100 m scale.
///
/// Constant for now; the metres-per-pixel dependence on latitude is small at
/// the zooms we use.
pub fn zoom_for_100m(_lat: f64) -> u8 {
    ZOOM_100M
}
