//! Property tests for the hull builder.
//!
//! Integer-valued coordinates keep every orientation test exact, and the
//! small grid makes duplicates and collinear runs common.

use geozone::hull::{hull_contains, is_strictly_convex, signed_area};
use geozone::sample::{scatter, PointCount, ReplayToken, ScatterCfg};
use geozone::{compute_hull, cross, Coordinate};
use proptest::prelude::*;

fn grid_points(max_len: usize) -> impl Strategy<Value = Vec<Coordinate>> {
    prop::collection::vec((-12i32..12, -12i32..12), 0..max_len).prop_map(|v| {
        v.into_iter()
            .map(|(lat, lng)| Coordinate::new(lat as f64, lng as f64))
            .collect()
    })
}

fn all_collinear(pts: &[Coordinate]) -> bool {
    pts.iter().all(|&a| {
        pts.iter()
            .all(|&b| pts.iter().all(|&c| cross(a, b, c) == 0.0))
    })
}

proptest! {
    #[test]
    fn short_inputs_pass_through(pts in grid_points(3)) {
        prop_assert_eq!(compute_hull(&pts), pts);
    }

    #[test]
    fn hull_is_strictly_convex_and_ccw(pts in grid_points(40)) {
        prop_assume!(pts.len() >= 3 && !all_collinear(&pts));
        let h = compute_hull(&pts);
        prop_assert!(h.len() >= 3);
        prop_assert!(is_strictly_convex(&h));
        prop_assert!(signed_area(&h) > 0.0);
    }

    #[test]
    fn hull_contains_every_input(pts in grid_points(40)) {
        prop_assume!(pts.len() >= 3 && !all_collinear(&pts));
        let h = compute_hull(&pts);
        for p in &pts {
            prop_assert!(hull_contains(&h, *p, 0.0), "{:?} outside {:?}", p, h);
        }
    }

    #[test]
    fn hull_vertices_come_from_input(pts in grid_points(40)) {
        prop_assume!(pts.len() >= 3);
        let h = compute_hull(&pts);
        for v in &h {
            prop_assert!(pts.contains(v));
        }
    }

    #[test]
    fn pivot_is_lowest_then_leftmost(pts in grid_points(40)) {
        prop_assume!(pts.len() >= 3);
        let h = compute_hull(&pts);
        let p0 = h[0];
        for p in &pts {
            prop_assert!(p0.lat < p.lat || (p0.lat == p.lat && p0.lng <= p.lng));
        }
    }

    #[test]
    fn hull_is_idempotent(pts in grid_points(40)) {
        prop_assume!(pts.len() >= 3 && !all_collinear(&pts));
        let h = compute_hull(&pts);
        prop_assert_eq!(compute_hull(&h), h);
    }

    #[test]
    fn input_order_does_not_change_the_shape(pts in grid_points(30)) {
        prop_assume!(pts.len() >= 3 && !all_collinear(&pts));
        let mut rev = pts.clone();
        rev.reverse();
        prop_assert_eq!(compute_hull(&rev), compute_hull(&pts));
    }
}

#[test]
fn scattered_clouds_near_seoul() {
    let cfg = ScatterCfg {
        count: PointCount::Uniform { min: 3, max: 200 },
        snap_deg: Some(0.0005),
        ..ScatterCfg::default()
    };
    for index in 0..50 {
        let pts = scatter(cfg, ReplayToken { seed: 2024, index });
        let h = compute_hull(&pts);
        if h.len() < 3 {
            continue;
        }
        assert!(signed_area(&h) > 0.0);
        for p in &pts {
            // snapped decimals are not exact; allow a rounding-sized slack
            assert!(hull_contains(&h, *p, 1e-12), "{p:?} outside hull");
        }
    }
}
