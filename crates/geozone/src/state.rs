//! Application state of the map editor.
//!
//! One explicit object owns the coordinate lists, click modes and drawn
//! overlays. UI events call methods here; anything visible goes out through
//! a `RenderSink`. The hull stays a pure function called from `show_zone`.
//!
//! Besides the editor, `render_layout` draws a whole site layout (area,
//! preset-colored zones, selectable site markers) in one pass, replacing the
//! previous layout.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cfg::{DEFAULT_CENTER, DEFAULT_COLOR, DEFAULT_ZOOM, MIN_POLYGON_POINTS};
use crate::coord::Coordinate;
use crate::render::{MarkerIcon, PolygonStyle, RenderSink, View};
use crate::zone::{Area, Marker, MarkerStyle, PolygonPreset, Zone, ZoneError, ZoneStyle};

/// Which editable coordinate list an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordList {
    Area,
    Zone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Lat,
    Lng,
}

/// What a map click did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Click {
    /// Appended to the zone list at this index.
    ZonePoint(usize),
    /// Moved the marker draft; marker mode is now off.
    MarkerMoved(Coordinate),
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub id: String,
    pub name: String,
    pub coordinates: Vec<Coordinate>,
    /// Cyan when absent.
    #[serde(default)]
    pub color: Option<PolygonPreset>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteSpec {
    pub id: String,
    pub name: String,
    pub position: Coordinate,
    #[serde(default)]
    pub selected: bool,
}

/// Everything one site map shows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Only used for the map bounds.
    #[serde(default)]
    pub area: Vec<Coordinate>,
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
    #[serde(default)]
    pub markers: Vec<SiteSpec>,
}

/// Counts from one `render_layout` pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutDrawn {
    pub zones: usize,
    pub sites: usize,
    pub skipped: usize,
}

#[derive(Clone, Debug)]
pub struct MapState {
    pub area_coords: Vec<Coordinate>,
    pub zone_coords: Vec<Coordinate>,
    pub zone_color: String,
    pub marker_coord: Coordinate,
    pub marker_style: MarkerStyle,
    zone_click_mode: bool,
    marker_click_mode: bool,
    zones: Vec<Zone>,
    markers: Vec<Marker>,
    layout_zones: Vec<Zone>,
    sites: Vec<Marker>,
    next_zone: u64,
    next_marker: u64,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            area_coords: Vec::new(),
            zone_coords: Vec::new(),
            zone_color: DEFAULT_COLOR.to_string(),
            marker_coord: DEFAULT_CENTER,
            marker_style: MarkerStyle::default(),
            zone_click_mode: false,
            marker_click_mode: false,
            zones: Vec::new(),
            markers: Vec::new(),
            layout_zones: Vec::new(),
            sites: Vec::new(),
            next_zone: 1,
            next_marker: 1,
        }
    }
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial view of a freshly created map.
    pub fn init_map<S: RenderSink>(&self, sink: &mut S) {
        sink.set_view(View {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        });
        info!("map created");
    }

    fn list_mut(&mut self, list: CoordList) -> &mut Vec<Coordinate> {
        match list {
            CoordList::Area => &mut self.area_coords,
            CoordList::Zone => &mut self.zone_coords,
        }
    }

    pub fn coords(&self, list: CoordList) -> &[Coordinate] {
        match list {
            CoordList::Area => &self.area_coords,
            CoordList::Zone => &self.zone_coords,
        }
    }

    /// Append a blank `(0, 0)` row for the form to fill in.
    pub fn add_coord(&mut self, list: CoordList) {
        self.push_coord(list, Coordinate::new(0.0, 0.0));
    }

    pub fn push_coord(&mut self, list: CoordList, c: Coordinate) {
        let coords = self.list_mut(list);
        coords.push(c);
        debug!(?list, lat = c.lat, lng = c.lng, len = coords.len(), "coord added");
    }

    /// Remove row `index`; out-of-range indices are ignored.
    pub fn remove_coord(&mut self, list: CoordList, index: usize) -> Option<Coordinate> {
        let coords = self.list_mut(list);
        if index >= coords.len() {
            warn!(?list, index, len = coords.len(), "remove out of range");
            return None;
        }
        let removed = coords.remove(index);
        debug!(?list, index, len = coords.len(), "coord removed");
        Some(removed)
    }

    /// Set one axis of row `index`. Returns false if the row does not exist.
    pub fn update_coord(&mut self, list: CoordList, index: usize, axis: Axis, value: f64) -> bool {
        let coords = self.list_mut(list);
        let Some(c) = coords.get_mut(index) else {
            warn!(?list, index, "update out of range");
            return false;
        };
        match axis {
            Axis::Lat => c.lat = value,
            Axis::Lng => c.lng = value,
        }
        true
    }

    pub fn zone_click_mode(&self) -> bool {
        self.zone_click_mode
    }

    pub fn marker_click_mode(&self) -> bool {
        self.marker_click_mode
    }

    pub fn toggle_zone_click_mode(&mut self) -> bool {
        self.zone_click_mode = !self.zone_click_mode;
        debug!(on = self.zone_click_mode, "zone click mode");
        self.zone_click_mode
    }

    pub fn toggle_marker_click_mode(&mut self) -> bool {
        self.marker_click_mode = !self.marker_click_mode;
        debug!(on = self.marker_click_mode, "marker click mode");
        self.marker_click_mode
    }

    /// Map click. Zone mode takes precedence over marker mode; marker mode
    /// is one-shot.
    pub fn handle_click(&mut self, at: Coordinate) -> Click {
        if self.zone_click_mode {
            self.zone_coords.push(at);
            info!(lat = at.lat, lng = at.lng, "zone point added");
            Click::ZonePoint(self.zone_coords.len() - 1)
        } else if self.marker_click_mode {
            self.marker_coord = at;
            self.marker_click_mode = false;
            info!(lat = at.lat, lng = at.lng, "marker position picked");
            Click::MarkerMoved(at)
        } else {
            Click::Ignored
        }
    }

    /// Fit the map to the area points, then center on their mean at the 100 m zoom.
    pub fn show_area<S: RenderSink>(&self, sink: &mut S) -> Result<Area, ZoneError> {
        let area = Area::build(&self.area_coords).inspect_err(|e| warn!(%e, "area rejected"))?;
        sink.fit_bounds(area.bounds());
        let view = area.view();
        sink.set_view(view);
        info!(lat = view.center.lat, lng = view.center.lng, zoom = view.zoom, "area set");
        Ok(area)
    }

    /// Build a zone from the zone points (convex hull), draw it, leave click mode.
    pub fn show_zone<S: RenderSink>(&mut self, sink: &mut S) -> Result<&Zone, ZoneError> {
        let id = format!("zone-{}", self.next_zone);
        let style = ZoneStyle::with_color(self.zone_color.clone());
        let zone = Zone::build(id, &self.zone_coords, style)
            .inspect_err(|e| warn!(%e, "zone rejected"))?;
        sink.draw_polygon(&zone.id, &zone.boundary, &PolygonStyle::from(&zone.style));
        info!(
            id = %zone.id,
            source = zone.source_len,
            hull = zone.boundary.len(),
            "zone drawn"
        );
        self.next_zone += 1;
        self.zone_click_mode = false;
        self.zones.push(zone);
        Ok(&self.zones[self.zones.len() - 1])
    }

    pub fn show_marker<S: RenderSink>(&mut self, sink: &mut S) -> Result<&Marker, ZoneError> {
        let id = format!("marker-{}", self.next_marker);
        let marker = Marker::build(id, self.marker_coord, self.marker_style.clone())
            .inspect_err(|e| warn!(%e, "marker rejected"))?;
        sink.draw_marker(
            &marker.id,
            &marker.name,
            marker.coordinate,
            &MarkerIcon::from(&marker),
        );
        info!(id = %marker.id, lat = marker.coordinate.lat, lng = marker.coordinate.lng, "marker drawn");
        self.next_marker += 1;
        self.markers.push(marker);
        Ok(&self.markers[self.markers.len() - 1])
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Remove a drawn zone. Returns false for unknown ids.
    pub fn remove_zone<S: RenderSink>(&mut self, sink: &mut S, id: &str) -> bool {
        let Some(pos) = self.zones.iter().position(|z| z.id == id) else {
            return false;
        };
        self.zones.remove(pos);
        sink.remove_overlay(id);
        info!(id, "zone removed");
        true
    }

    /// Remove every drawn zone and marker, layout included. Coordinate lists
    /// are kept.
    pub fn clear<S: RenderSink>(&mut self, sink: &mut S) {
        for z in self.zones.drain(..) {
            sink.remove_overlay(&z.id);
        }
        for m in self.markers.drain(..) {
            sink.remove_overlay(&m.id);
        }
        self.clear_layout(sink);
        info!("overlays cleared");
    }

    pub fn layout_zones(&self) -> &[Zone] {
        &self.layout_zones
    }

    pub fn sites(&self) -> &[Marker] {
        &self.sites
    }

    fn clear_layout<S: RenderSink>(&mut self, sink: &mut S) {
        for z in self.layout_zones.drain(..) {
            sink.remove_overlay(&z.id);
        }
        for m in self.sites.drain(..) {
            sink.remove_overlay(&m.id);
        }
    }

    /// Draw `layout`, replacing the previously drawn one.
    ///
    /// Returns `None` and leaves the map untouched when the area has fewer
    /// than 3 points or an invalid one. Zones with fewer than 3 points, zones
    /// that fail to build and sites at invalid positions are skipped one by
    /// one.
    pub fn render_layout<S: RenderSink>(
        &mut self,
        sink: &mut S,
        layout: &Layout,
    ) -> Option<LayoutDrawn> {
        if layout.area.len() < MIN_POLYGON_POINTS {
            debug!(area = layout.area.len(), "layout skipped");
            return None;
        }
        let area = Area::build(&layout.area)
            .inspect_err(|e| warn!(%e, "layout area rejected"))
            .ok()?;

        self.clear_layout(sink);
        sink.fit_bounds(area.bounds());

        let mut skipped = 0;
        for spec in &layout.zones {
            if spec.coordinates.len() < MIN_POLYGON_POINTS {
                debug!(id = %spec.id, points = spec.coordinates.len(), "zone skipped");
                skipped += 1;
                continue;
            }
            let style = spec.color.unwrap_or_default().zone_style();
            match Zone::build(spec.id.clone(), &spec.coordinates, style) {
                Ok(zone) => {
                    let zone = zone.with_name(spec.name.clone());
                    sink.draw_polygon(&zone.id, &zone.boundary, &PolygonStyle::from(&zone.style));
                    self.layout_zones.push(zone);
                }
                Err(e) => {
                    warn!(id = %spec.id, %e, "zone skipped");
                    skipped += 1;
                }
            }
        }
        for spec in &layout.markers {
            match Marker::site(spec.id.clone(), spec.name.clone(), spec.position, spec.selected) {
                Ok(site) => {
                    sink.draw_marker(&site.id, &site.name, site.coordinate, &MarkerIcon::from(&site));
                    self.sites.push(site);
                }
                Err(e) => {
                    warn!(id = %spec.id, %e, "site skipped");
                    skipped += 1;
                }
            }
        }

        let drawn = LayoutDrawn {
            zones: self.layout_zones.len(),
            sites: self.sites.len(),
            skipped,
        };
        info!(zones = drawn.zones, sites = drawn.sites, skipped, "layout drawn");
        Some(drawn)
    }

    /// Switch a site marker between cube and pin. Returns false for unknown ids.
    pub fn select_site<S: RenderSink>(&mut self, sink: &mut S, id: &str, selected: bool) -> bool {
        let Some(site) = self.sites.iter_mut().find(|m| m.id == id) else {
            warn!(id, "select on unknown site");
            return false;
        };
        site.set_selected(selected);
        sink.set_marker_icon(id, &MarkerIcon::from(&*site));
        debug!(id, selected, "site selection");
        true
    }
}
