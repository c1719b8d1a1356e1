//! Zone geometry for map drawing.
//!
//! Turns user-supplied (latitude, longitude) points into map regions.
//! The hull builder is pure; everything that talks to a map goes through
//! the `render::RenderSink` seam and is driven by `state::MapState`.
//!
//! Conventions
//! - Planar math treats `lng` as x and `lat` as y (see `Coordinate::to_vec2`).
//! - Polygons are counter-clockwise in that frame.

pub mod cfg;
pub mod coord;
pub mod hull;
pub mod measure;
pub mod render;
pub mod sample;
pub mod state;
pub mod zone;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use coord::Coordinate;
pub use hull::{compute_hull, cross};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::coord::{are_valid, Coordinate};
    pub use crate::hull::{compute_hull, cross, hull_contains};
    pub use crate::measure::{center, distance_m, Bounds};
    pub use crate::render::{DrawCommand, PolygonStyle, Recorder, RenderSink, View};
    pub use crate::sample::{scatter, ReplayToken, ScatterCfg};
    pub use crate::state::{Axis, Layout, MapState};
    pub use crate::zone::{
        Area, Marker, MarkerKind, MarkerStyle, PolygonPreset, Zone, ZoneError, ZoneStyle,
    };
}
