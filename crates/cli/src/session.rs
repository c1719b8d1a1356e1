use geozone::prelude::*;
use geozone::state::CoordList;

use crate::input::PlanInput;

/// Replay a plan against a fresh map and return the recorded draw calls.
///
/// Editor steps come first (area, zones, markers), then the layout and the
/// site selections. Rejected steps are logged and skipped.
pub fn replay(session: PlanInput) -> Recorder {
    let mut state = MapState::new();
    let mut sink = Recorder::new();
    state.init_map(&mut sink);

    if !session.area.is_empty() {
        state.area_coords = session.area;
        if let Err(e) = state.show_area(&mut sink) {
            tracing::warn!(%e, "area skipped");
        }
    }
    if let Some(color) = session.zone_color {
        state.zone_color = color;
    }
    for (k, points) in session.zones.into_iter().enumerate() {
        state.zone_coords.clear();
        for p in points {
            state.push_coord(CoordList::Zone, p);
        }
        if let Err(e) = state.show_zone(&mut sink) {
            tracing::warn!(zone = k, %e, "zone skipped");
        }
    }
    for m in &session.markers {
        state.marker_coord = m.coordinate();
        state.marker_style = m.style();
        if let Err(e) = state.show_marker(&mut sink) {
            tracing::warn!(%e, "marker skipped");
        }
    }
    if let Some(layout) = &session.layout {
        if state.render_layout(&mut sink, layout).is_none() {
            tracing::warn!(area = layout.area.len(), "layout not drawn");
        }
    }
    for id in &session.select {
        state.select_site(&mut sink, id, true);
    }

    tracing::info!(
        zones = state.zones().len(),
        markers = state.markers().len(),
        layout_zones = state.layout_zones().len(),
        sites = state.sites().len(),
        commands = sink.commands.len(),
        "plan"
    );
    sink
}
