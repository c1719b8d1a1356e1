//! Convex hull of a point set (Graham scan around the lowest point).
//!
//! Purpose
//! - Turn the points a user typed or clicked into a polygon boundary that
//!   can be handed to the map as-is.
//!
//! Contract
//! - Fewer than 3 points: returned unchanged, in input order. Callers that
//!   need a polygon check `len() >= 3` themselves (see `zone::Zone::build`).
//! - Otherwise: counter-clockwise in the (lng, lat) plane, starting at the
//!   pivot (lowest lat, then lowest lng), strictly convex. Collinear boundary
//!   points are dropped.
//! - Pure and deterministic for a fixed input order (stable sort).
//!
//! Numerics
//! - Angles come from `atan2(Δlat, Δlng)`; every other point lies in the
//!   closed upper half-plane of the pivot, so angles fall in `[0, π]`.
//! - Equal-angle ties are broken by distance, nearer first. When rounding
//!   splits a ray into two "different" angles the scan still sees the
//!   exact collinearity through `cross` and keeps the far point.

use nalgebra::Vector2;

use crate::coord::Coordinate;

/// Orientation of `o → a → b` in the (lng, lat) plane.
///
/// `(a.x−o.x)(b.y−o.y) − (a.y−o.y)(b.x−o.x)` with x = lng, y = lat.
/// Positive: left turn (counter-clockwise). Zero: collinear. Negative: right turn.
#[inline]
pub fn cross(o: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    let oa = a.to_vec2() - o.to_vec2();
    let ob = b.to_vec2() - o.to_vec2();
    oa.x * ob.y - oa.y * ob.x
}

/// Index of the hull pivot: smallest lat, ties broken by smallest lng.
/// First occurrence wins among exact duplicates.
fn pivot_index(points: &[Coordinate]) -> usize {
    let mut lowest = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let q = points[lowest];
        if p.lat < q.lat || (p.lat == q.lat && p.lng < q.lng) {
            lowest = i;
        }
    }
    lowest
}

/// `p` lies strictly inside the segment `a–b` (exactly collinear).
#[inline]
fn strictly_between(a: Coordinate, b: Coordinate, p: Coordinate) -> bool {
    let ab: Vector2<f64> = b.to_vec2() - a.to_vec2();
    let ap: Vector2<f64> = p.to_vec2() - a.to_vec2();
    cross(a, b, p) == 0.0 && ap.dot(&ab) > 0.0 && ap.norm_squared() < ab.norm_squared()
}

/// Convex hull of `points` (see module docs for the contract).
pub fn compute_hull(points: &[Coordinate]) -> Vec<Coordinate> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let lowest = pivot_index(points);
    let p0 = points[lowest];
    let origin = p0.to_vec2();

    let mut keyed: Vec<(f64, f64, Coordinate)> = points
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != lowest)
        .map(|(_, &p)| {
            let d = p.to_vec2() - origin;
            (d.y.atan2(d.x), d.norm(), p)
        })
        .collect();
    // `sort_by` is stable; equal (angle, distance) keep input order.
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    let sorted: Vec<Coordinate> = keyed.into_iter().map(|(_, _, p)| p).collect();

    let mut hull: Vec<Coordinate> = Vec::with_capacity(sorted.len() + 1);
    hull.push(p0);
    hull.push(sorted[0]);
    for &p in &sorted[1..] {
        let n = hull.len();
        if n > 1 && strictly_between(hull[n - 2], hull[n - 1], p) {
            continue;
        }
        while hull.len() > 1 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    // Close the cycle: drop trailing vertices lying on the edge back to the pivot.
    while hull.len() > 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p0) <= 0.0 {
        hull.pop();
    }
    hull
}

/// True if `p` is inside or on the counter-clockwise convex polygon `poly`.
///
/// `eps` is an absolute slack on the orientation value (degrees²); use 0 for
/// exact inputs. Polygons with fewer than 3 vertices contain nothing.
pub fn hull_contains(poly: &[Coordinate], p: Coordinate, eps: f64) -> bool {
    if poly.len() < 3 {
        return false;
    }
    (0..poly.len()).all(|k| cross(poly[k], poly[(k + 1) % poly.len()], p) >= -eps)
}

/// Every consecutive triple (with wraparound) turns strictly left.
pub fn is_strictly_convex(poly: &[Coordinate]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|k| cross(poly[k], poly[(k + 1) % n], poly[(k + 2) % n]) > 0.0)
}

/// Shoelace signed area in degrees²; positive for counter-clockwise order.
pub fn signed_area(poly: &[Coordinate]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for k in 0..n {
        let p = poly[k].to_vec2();
        let q = poly[(k + 1) % n].to_vec2();
        a += p.x * q.y - q.x * p.y;
    }
    0.5 * a
}
