//! Zones, areas and markers: validated values ready for drawing.
//!
//! The hull builder never fails; this is where "fewer than 3 points" and
//! out-of-range coordinates become errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cfg::{DEFAULT_COLOR, MIN_POLYGON_POINTS};
use crate::coord::{first_invalid, Coordinate};
use crate::hull::compute_hull;
use crate::measure::{center, zoom_for_100m, Bounds};
use crate::render::View;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ZoneError {
    #[error("at least {min} coordinates are required, got {got}")]
    TooFewPoints { got: usize, min: usize },
    #[error("coordinate #{index} is out of range: {coordinate:?}")]
    InvalidCoordinate { index: usize, coordinate: Coordinate },
    #[error("points span no area: hull has {hull_len} vertices")]
    DegenerateHull { hull_len: usize },
}

fn validate(points: &[Coordinate]) -> Result<(), ZoneError> {
    if let Some(index) = first_invalid(points) {
        return Err(ZoneError::InvalidCoordinate {
            index,
            coordinate: points[index],
        });
    }
    if points.len() < MIN_POLYGON_POINTS {
        return Err(ZoneError::TooFewPoints {
            got: points.len(),
            min: MIN_POLYGON_POINTS,
        });
    }
    Ok(())
}

/// Fill/stroke settings of a zone polygon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneStyle {
    pub color: String,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: f64,
    pub fill_opacity: f64,
}

impl ZoneStyle {
    /// Default opacities with fill and stroke in `color`.
    pub fn with_color(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            stroke_color: color.clone(),
            color,
            ..Self::default()
        }
    }
}

impl Default for ZoneStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            stroke_color: DEFAULT_COLOR.to_string(),
            stroke_opacity: 0.8,
            stroke_weight: 2.0,
            fill_opacity: 0.35,
        }
    }
}

/// Named colors for layout zones. Presets share one look: faint fill,
/// opaque 3 px outline in the same color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonPreset {
    #[default]
    Cyan,
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
}

impl PolygonPreset {
    pub const ALL: [PolygonPreset; 6] = [
        PolygonPreset::Cyan,
        PolygonPreset::Blue,
        PolygonPreset::Green,
        PolygonPreset::Red,
        PolygonPreset::Yellow,
        PolygonPreset::Purple,
    ];

    pub fn color(self) -> &'static str {
        match self {
            PolygonPreset::Cyan => "#4FC3F7",
            PolygonPreset::Blue => "#2196F3",
            PolygonPreset::Green => "#4CAF50",
            PolygonPreset::Red => "#F44336",
            PolygonPreset::Yellow => "#FFC107",
            PolygonPreset::Purple => "#9C27B0",
        }
    }

    pub fn zone_style(self) -> ZoneStyle {
        ZoneStyle {
            color: self.color().to_string(),
            stroke_color: self.color().to_string(),
            stroke_opacity: 1.0,
            stroke_weight: 3.0,
            fill_opacity: 0.12,
        }
    }
}

impl std::str::FromStr for PolygonPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolygonPreset::ALL
            .into_iter()
            .find(|p| format!("{p:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown zone color: {s}"))
    }
}

/// A filled region whose boundary is the convex hull of the entered points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    /// Display name; the id unless set with `with_name`.
    pub name: String,
    /// Number of points the hull was computed from.
    pub source_len: usize,
    /// Counter-clockwise, strictly convex, at least 3 vertices.
    pub boundary: Vec<Coordinate>,
    pub style: ZoneStyle,
}

impl Zone {
    pub fn build(
        id: impl Into<String>,
        points: &[Coordinate],
        style: ZoneStyle,
    ) -> Result<Self, ZoneError> {
        validate(points)?;
        let boundary = compute_hull(points);
        if boundary.len() < MIN_POLYGON_POINTS {
            return Err(ZoneError::DegenerateHull {
                hull_len: boundary.len(),
            });
        }
        let id = id.into();
        Ok(Self {
            name: id.clone(),
            id,
            source_len: points.len(),
            boundary,
            style,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn bounds(&self) -> Bounds {
        // `build` guarantees a non-empty boundary.
        Bounds::from_coords(&self.boundary).unwrap_or_else(|| Bounds::around(center(&[])))
    }
}

/// The working area the map is zoomed to. Points are kept as entered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub points: Vec<Coordinate>,
}

impl Area {
    pub fn build(points: &[Coordinate]) -> Result<Self, ZoneError> {
        validate(points)?;
        Ok(Self {
            points: points.to_vec(),
        })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_coords(&self.points).unwrap_or_else(|| Bounds::around(center(&[])))
    }

    /// Mean of the entered points.
    pub fn center(&self) -> Coordinate {
        center(&self.points)
    }

    /// View applied after fitting the bounds: area center at the 100 m zoom.
    pub fn view(&self) -> View {
        let center = self.center();
        View {
            center,
            zoom: zoom_for_100m(center.lat),
        }
    }
}

/// Marker shapes offered by the style picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    #[default]
    Pin,
    Circle,
    Square,
    Star,
}

/// Icon parameters for a marker kind; the SVG path itself lives in the front end.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IconParams {
    pub fill_opacity: f64,
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
    pub scale: f64,
    /// Anchor offset `(x, y)` in icon pixels.
    pub anchor: (f64, f64),
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 4] = [
        MarkerKind::Pin,
        MarkerKind::Circle,
        MarkerKind::Square,
        MarkerKind::Star,
    ];

    pub fn icon(self) -> IconParams {
        let (fill_opacity, stroke_weight, scale, anchor_y) = match self {
            MarkerKind::Pin => (0.9, 3.0, 1.2, 10.0),
            MarkerKind::Circle => (0.85, 2.5, 1.5, 0.0),
            MarkerKind::Square => (0.9, 2.5, 1.3, 10.0),
            MarkerKind::Star => (0.95, 2.0, 1.2, 7.0),
        };
        IconParams {
            fill_opacity,
            stroke_color: "#ffffff",
            stroke_weight,
            scale,
            anchor: (0.0, anchor_y),
        }
    }
}

impl std::str::FromStr for MarkerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pin" => Ok(MarkerKind::Pin),
            "circle" => Ok(MarkerKind::Circle),
            "square" => Ok(MarkerKind::Square),
            "star" => Ok(MarkerKind::Star),
            other => Err(format!("unknown marker kind: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub kind: MarkerKind,
    pub color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            kind: MarkerKind::default(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Icon of a layout marker: a cube at rest, a pin while selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteShape {
    Cube,
    Pin,
}

impl SiteShape {
    pub fn for_selection(selected: bool) -> Self {
        if selected {
            SiteShape::Pin
        } else {
            SiteShape::Cube
        }
    }

    /// Scaled `(width, height)` in pixels. The pin is 1.4 times taller than wide.
    pub fn extent(self) -> (f64, f64) {
        match self {
            SiteShape::Cube => (32.0, 32.0),
            SiteShape::Pin => (48.0, 48.0 * 1.4),
        }
    }

    /// Bottom center; the pin tip sits 3 px above the bottom edge.
    pub fn anchor(self) -> (f64, f64) {
        let (w, h) = self.extent();
        match self {
            SiteShape::Cube => (w / 2.0, h),
            SiteShape::Pin => (w / 2.0, h - 3.0),
        }
    }
}

/// How a marker is drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "look", rename_all = "snake_case")]
pub enum MarkerLook {
    /// Shape and color picked in the marker form.
    Styled(MarkerStyle),
    /// Site marker of a layout; selection switches cube and pin.
    Site { selected: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    /// Shown as the marker title.
    pub name: String,
    pub coordinate: Coordinate,
    pub look: MarkerLook,
}

fn check_position(coordinate: Coordinate) -> Result<(), ZoneError> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        Err(ZoneError::InvalidCoordinate {
            index: 0,
            coordinate,
        })
    }
}

impl Marker {
    /// Editor marker; its name is the id.
    pub fn build(
        id: impl Into<String>,
        coordinate: Coordinate,
        style: MarkerStyle,
    ) -> Result<Self, ZoneError> {
        check_position(coordinate)?;
        let id = id.into();
        Ok(Self {
            name: id.clone(),
            id,
            coordinate,
            look: MarkerLook::Styled(style),
        })
    }

    pub fn site(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinate: Coordinate,
        selected: bool,
    ) -> Result<Self, ZoneError> {
        check_position(coordinate)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            look: MarkerLook::Site { selected },
        })
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.look, MarkerLook::Site { selected: true })
    }

    /// Select or deselect a site marker. Styled markers have no selection
    /// state; returns false for them.
    pub fn set_selected(&mut self, on: bool) -> bool {
        match &mut self.look {
            MarkerLook::Site { selected } => {
                *selected = on;
                true
            }
            MarkerLook::Styled(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::is_strictly_convex;

    fn seoul_triangle() -> Vec<Coordinate> {
        vec![
            Coordinate::new(37.5665, 126.978),
            Coordinate::new(37.5700, 126.985),
            Coordinate::new(37.5630, 126.990),
        ]
    }

    #[test]
    fn zone_from_triangle() {
        let z = Zone::build("zone-1", &seoul_triangle(), ZoneStyle::default()).unwrap();
        assert_eq!(z.source_len, 3);
        assert_eq!(z.boundary.len(), 3);
        assert_eq!(z.boundary[0], Coordinate::new(37.5630, 126.990));
        assert!(is_strictly_convex(&z.boundary));
        assert!(z.boundary.iter().all(|&p| z.bounds().contains(p)));
    }

    #[test]
    fn zone_rejects_too_few_points() {
        let pts = &seoul_triangle()[..2];
        let err = Zone::build("z", pts, ZoneStyle::default()).unwrap_err();
        assert_eq!(err, ZoneError::TooFewPoints { got: 2, min: 3 });
        assert_eq!(
            err.to_string(),
            "at least 3 coordinates are required, got 2"
        );
    }

    #[test]
    fn zone_rejects_invalid_coordinate_first() {
        let mut pts = seoul_triangle();
        pts[1].lat = 91.0;
        let err = Zone::build("z", &pts, ZoneStyle::default()).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidCoordinate { index: 1, .. }));
        // Invalid wins over the count check, as in the form validation.
        let err = Zone::build("z", &pts[..2], ZoneStyle::default()).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidCoordinate { index: 1, .. }));
    }

    #[test]
    fn zone_rejects_collinear_points() {
        let pts = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ];
        let err = Zone::build("z", &pts, ZoneStyle::default()).unwrap_err();
        assert_eq!(err, ZoneError::DegenerateHull { hull_len: 2 });
    }

    #[test]
    fn default_color_is_in_palette() {
        assert!(crate::cfg::PALETTE.contains(&ZoneStyle::default().color.as_str()));
        assert!(crate::cfg::PALETTE.contains(&MarkerStyle::default().color.as_str()));
    }

    #[test]
    fn style_with_color_sets_stroke_too() {
        let s = ZoneStyle::with_color("#4ECDC4");
        assert_eq!(s.color, "#4ECDC4");
        assert_eq!(s.stroke_color, "#4ECDC4");
        assert_eq!(s.fill_opacity, 0.35);
        assert_eq!(s.stroke_opacity, 0.8);
    }

    #[test]
    fn area_view_uses_mean_center_and_fixed_zoom() {
        let pts = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 3.0),
            Coordinate::new(3.0, 0.0),
        ];
        let a = Area::build(&pts).unwrap();
        let v = a.view();
        assert_eq!(v.center, Coordinate::new(1.0, 1.0));
        assert_eq!(v.zoom, crate::cfg::ZOOM_100M);
        assert_eq!(a.points, pts.to_vec());
        assert!(Area::build(&pts[..1]).is_err());
    }

    #[test]
    fn marker_kinds_parse_and_carry_icons() {
        for kind in MarkerKind::ALL {
            let name = serde_json::to_value(kind).unwrap();
            let parsed: MarkerKind = name.as_str().unwrap().parse().unwrap();
            assert_eq!(parsed, kind);
            assert!(kind.icon().scale > 0.0);
        }
        assert!("hexagon".parse::<MarkerKind>().is_err());
        assert_eq!(MarkerKind::Circle.icon().anchor, (0.0, 0.0));
    }

    #[test]
    fn marker_requires_valid_coordinate() {
        let ok = Marker::build("m", Coordinate::new(1.0, 1.0), MarkerStyle::default()).unwrap();
        assert_eq!(ok.name, "m");
        assert!(!ok.is_selected());
        let bad = Marker::build("m", Coordinate::new(0.0, 200.0), MarkerStyle::default());
        assert!(matches!(bad, Err(ZoneError::InvalidCoordinate { .. })));
        let bad = Marker::site("s", "Dock", Coordinate::new(-91.0, 0.0), true);
        assert!(matches!(bad, Err(ZoneError::InvalidCoordinate { .. })));
    }

    #[test]
    fn zone_name_defaults_to_id() {
        let z = Zone::build("zone-7", &seoul_triangle(), ZoneStyle::default()).unwrap();
        assert_eq!(z.name, "zone-7");
        assert_eq!(z.with_name("Loading bay").name, "Loading bay");
    }

    #[test]
    fn presets_share_one_look() {
        for p in PolygonPreset::ALL {
            let s = p.zone_style();
            assert_eq!(s.color, p.color());
            assert_eq!(s.stroke_color, p.color());
            assert_eq!(s.fill_opacity, 0.12);
            assert_eq!(s.stroke_opacity, 1.0);
            assert_eq!(s.stroke_weight, 3.0);
            let name = serde_json::to_value(p).unwrap();
            assert_eq!(name.as_str().unwrap().parse::<PolygonPreset>(), Ok(p));
        }
        assert_eq!(PolygonPreset::default(), PolygonPreset::Cyan);
        assert_eq!("Purple".parse::<PolygonPreset>(), Ok(PolygonPreset::Purple));
        assert!("teal".parse::<PolygonPreset>().is_err());
        let p: PolygonPreset = serde_json::from_str("\"green\"").unwrap();
        assert_eq!(p.color(), "#4CAF50");
    }

    #[test]
    fn site_selection_switches_cube_and_pin() {
        let mut m = Marker::site("s1", "Gate A", Coordinate::new(33.28, -111.55), false).unwrap();
        assert_eq!(m.name, "Gate A");
        assert_eq!(SiteShape::for_selection(m.is_selected()), SiteShape::Cube);
        assert_eq!(SiteShape::Cube.extent(), (32.0, 32.0));
        assert_eq!(SiteShape::Cube.anchor(), (16.0, 32.0));

        assert!(m.set_selected(true));
        assert!(m.is_selected());
        let (w, h) = SiteShape::Pin.extent();
        assert_eq!(w, 48.0);
        assert!((h - 67.2).abs() < 1e-9);
        let (ax, ay) = SiteShape::Pin.anchor();
        assert_eq!(ax, 24.0);
        assert!((ay - 64.2).abs() < 1e-9);

        let mut styled = Marker::build("m", Coordinate::new(0.0, 0.0), MarkerStyle::default()).unwrap();
        assert!(!styled.set_selected(true));
        assert!(!styled.is_selected());
    }
}
