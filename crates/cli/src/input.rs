use anyhow::{bail, Context, Result};
use geozone::state::Layout;
use geozone::zone::{MarkerKind, MarkerStyle};
use geozone::Coordinate;
use polars::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Read points from `.csv` (columns `lat`, `lng`) or JSON (array of `{lat, lng}`).
pub fn read_points(path: &Path) -> Result<Vec<Coordinate>> {
    let is_csv = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path)
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }
}

fn read_csv(path: &Path) -> Result<Vec<Coordinate>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select([
            col("lat").cast(DataType::Float64),
            col("lng").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading lat/lng columns from {}", path.display()))?;
    tracing::debug!(rows = df.height(), "csv_points");
    let lat = df.column("lat")?.f64()?;
    let lng = df.column("lng")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (a, b)) in lat.into_iter().zip(lng.into_iter()).enumerate() {
        match (a, b) {
            (Some(lat), Some(lng)) => out.push(Coordinate::new(lat, lng)),
            _ => bail!("{}: row {row} is missing lat or lng", path.display()),
        }
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
pub struct MarkerInput {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub kind: MarkerKind,
    pub color: Option<String>,
}

impl MarkerInput {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn style(&self) -> MarkerStyle {
        let mut s = MarkerStyle {
            kind: self.kind,
            ..MarkerStyle::default()
        };
        if let Some(c) = &self.color {
            s.color = c.clone();
        }
        s
    }
}

/// Scripted session for `plan`: editor steps, then an optional site layout.
#[derive(Debug, Default, Deserialize)]
pub struct PlanInput {
    #[serde(default)]
    pub area: Vec<Coordinate>,
    #[serde(default)]
    pub zones: Vec<Vec<Coordinate>>,
    pub zone_color: Option<String>,
    #[serde(default)]
    pub markers: Vec<MarkerInput>,
    pub layout: Option<Layout>,
    /// Site ids to select once the layout is drawn.
    #[serde(default)]
    pub select: Vec<String>,
}

pub fn read_plan(path: &Path) -> Result<PlanInput> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}
