//! Random point clouds around a map location (replay tokens).
//!
//! Purpose
//! - Deterministic input for hull benchmarks, property tests and the CLI
//!   `sample` command. Same `(cfg, token)` gives the same points.
//!
//! Model
//! - `n` points uniform in a disk of `spread_m` metres around `center`,
//!   converted to degrees with a local equirectangular approximation.
//! - Optional snapping to a degree grid, which produces the duplicates and
//!   collinear runs that hand-clicked input has.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::{DEFAULT_CENTER, EARTH_RADIUS_M};
use crate::coord::Coordinate;

/// Point count distribution.
#[derive(Clone, Copy, Debug)]
pub enum PointCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl PointCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            PointCount::Fixed(n) => n,
            PointCount::Uniform { min, max } => rng.gen_range(min..=max.max(min)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScatterCfg {
    pub count: PointCount,
    pub center: Coordinate,
    /// Disk radius in metres.
    pub spread_m: f64,
    /// Round lat/lng to multiples of this many degrees, if set.
    pub snap_deg: Option<f64>,
}

impl Default for ScatterCfg {
    fn default() -> Self {
        Self {
            count: PointCount::Fixed(32),
            center: DEFAULT_CENTER,
            spread_m: 500.0,
            snap_deg: None,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a point cloud. Points stay within `[-90, 90] × [-180, 180]`.
pub fn scatter(cfg: ScatterCfg, tok: ReplayToken) -> Vec<Coordinate> {
    let mut rng = tok.to_std_rng();
    let n = cfg.count.sample(&mut rng);
    let r_max = cfg.spread_m.max(0.0);
    let deg_per_m = (1.0 / EARTH_RADIUS_M).to_degrees();
    let cos_lat = cfg.center.lat.to_radians().cos().abs().max(1e-6);

    (0..n)
        .map(|_| {
            // sqrt for uniform density over the disk
            let r = r_max * rng.gen::<f64>().sqrt();
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            let d_lat = r * th.sin() * deg_per_m;
            let d_lng = r * th.cos() * deg_per_m / cos_lat;
            let mut lat = cfg.center.lat + d_lat;
            let mut lng = cfg.center.lng + d_lng;
            if let Some(step) = cfg.snap_deg.filter(|s| *s > 0.0) {
                lat = (lat / step).round() * step;
                lng = (lng / step).round() * step;
            }
            Coordinate::new(lat.clamp(-90.0, 90.0), lng.clamp(-180.0, 180.0))
        })
        .collect()
}
