//! Seam to the map provider.
//!
//! The provider is an opaque sink: it takes views, bounds, polygons and
//! markers and draws them. Overlays are addressed by the id of the zone or
//! marker that produced them. `Recorder` is the in-memory sink used by
//! tests and by the CLI to print a draw plan.

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;
use crate::measure::Bounds;
use crate::zone::{IconParams, Marker, MarkerKind, MarkerLook, SiteShape, ZoneStyle};

/// Map center and zoom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Polygon style as the provider expects it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// Zones must not swallow map clicks (click mode adds points through them).
    pub clickable: bool,
}

impl From<&ZoneStyle> for PolygonStyle {
    fn from(s: &ZoneStyle) -> Self {
        Self {
            stroke_color: s.stroke_color.clone(),
            stroke_opacity: s.stroke_opacity,
            stroke_weight: s.stroke_weight,
            fill_color: s.color.clone(),
            fill_opacity: s.fill_opacity,
            clickable: false,
        }
    }
}

/// Marker icon as the provider expects it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "icon", rename_all = "snake_case")]
pub enum MarkerIcon {
    Styled {
        kind: MarkerKind,
        fill_color: String,
        params: IconParams,
    },
    Site {
        shape: SiteShape,
        size: (f64, f64),
        anchor: (f64, f64),
        /// Selected markers are raised above every other marker.
        on_top: bool,
    },
}

impl From<&Marker> for MarkerIcon {
    fn from(m: &Marker) -> Self {
        match &m.look {
            MarkerLook::Styled(style) => MarkerIcon::Styled {
                kind: style.kind,
                fill_color: style.color.clone(),
                params: style.kind.icon(),
            },
            MarkerLook::Site { selected } => {
                let shape = SiteShape::for_selection(*selected);
                MarkerIcon::Site {
                    shape,
                    size: shape.extent(),
                    anchor: shape.anchor(),
                    on_top: *selected,
                }
            }
        }
    }
}

pub trait RenderSink {
    fn set_view(&mut self, view: View);
    fn fit_bounds(&mut self, bounds: Bounds);
    fn draw_polygon(&mut self, id: &str, path: &[Coordinate], style: &PolygonStyle);
    fn draw_marker(&mut self, id: &str, title: &str, position: Coordinate, icon: &MarkerIcon);
    /// Swap the icon of a drawn marker.
    fn set_marker_icon(&mut self, id: &str, icon: &MarkerIcon);
    fn remove_overlay(&mut self, id: &str);
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetView(View),
    FitBounds(Bounds),
    DrawPolygon {
        id: String,
        path: Vec<Coordinate>,
        style: PolygonStyle,
    },
    DrawMarker {
        id: String,
        title: String,
        position: Coordinate,
        icon: MarkerIcon,
    },
    SetMarkerIcon {
        id: String,
        icon: MarkerIcon,
    },
    RemoveOverlay {
        id: String,
    },
}

/// Sink that records every call in order.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of overlays drawn and not removed since, in draw order.
    pub fn live_overlays(&self) -> Vec<&str> {
        let mut live: Vec<&str> = Vec::new();
        for c in &self.commands {
            match c {
                DrawCommand::DrawPolygon { id, .. } | DrawCommand::DrawMarker { id, .. } => {
                    live.push(id)
                }
                DrawCommand::RemoveOverlay { id } => live.retain(|x| *x != id.as_str()),
                _ => {}
            }
        }
        live
    }
}

impl RenderSink for Recorder {
    fn set_view(&mut self, view: View) {
        self.commands.push(DrawCommand::SetView(view));
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.commands.push(DrawCommand::FitBounds(bounds));
    }

    fn draw_polygon(&mut self, id: &str, path: &[Coordinate], style: &PolygonStyle) {
        self.commands.push(DrawCommand::DrawPolygon {
            id: id.to_string(),
            path: path.to_vec(),
            style: style.clone(),
        });
    }

    fn draw_marker(&mut self, id: &str, title: &str, position: Coordinate, icon: &MarkerIcon) {
        self.commands.push(DrawCommand::DrawMarker {
            id: id.to_string(),
            title: title.to_string(),
            position,
            icon: icon.clone(),
        });
    }

    fn set_marker_icon(&mut self, id: &str, icon: &MarkerIcon) {
        self.commands.push(DrawCommand::SetMarkerIcon {
            id: id.to_string(),
            icon: icon.clone(),
        });
    }

    fn remove_overlay(&mut self, id: &str) {
        self.commands.push(DrawCommand::RemoveOverlay { id: id.to_string() });
    }
}
