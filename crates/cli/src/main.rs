use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geozone::prelude::*;
use geozone::sample::PointCount;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;
mod session;

use provenance::{write_sidecar, Step};

#[derive(Parser)]
#[command(name = "geozone")]
#[command(about = "Build map zones from coordinate lists")]
struct Cmd {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Convex hull of a point file (JSON array of {lat,lng} or CSV with lat,lng)
    Hull {
        #[arg(long)]
        input: PathBuf,
        /// Write the hull here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate points and build a zone (hull + style)
    Zone {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "zone-1")]
        id: String,
        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = geozone::cfg::DEFAULT_COLOR)]
        color: String,
        /// Named layout color (cyan, blue, green, red, yellow, purple) instead of --color
        #[arg(long, conflicts_with = "color")]
        preset: Option<PolygonPreset>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a reproducible random point cloud
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 32)]
        count: usize,
        #[arg(long, default_value_t = geozone::cfg::DEFAULT_CENTER.lat)]
        center_lat: f64,
        #[arg(long, default_value_t = geozone::cfg::DEFAULT_CENTER.lng)]
        center_lng: f64,
        #[arg(long, default_value_t = 500.0)]
        spread_m: f64,
        /// Snap coordinates to this grid (degrees)
        #[arg(long)]
        snap_deg: Option<f64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Replay an editor session and site layout, print the draw commands
    Plan {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print build revision, version and the named styles as JSON
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Hull { input, out } => hull(&input, out.as_deref()),
        Action::Zone {
            input,
            id,
            name,
            color,
            preset,
            out,
        } => {
            let style = match preset {
                Some(p) => p.zone_style(),
                None => ZoneStyle::with_color(color),
            };
            zone(&input, id, name, style, &out)
        }
        Action::Sample {
            seed,
            index,
            count,
            center_lat,
            center_lng,
            spread_m,
            snap_deg,
            out,
        } => {
            let cfg = ScatterCfg {
                count: PointCount::Fixed(count),
                center: Coordinate::new(center_lat, center_lng),
                spread_m,
                snap_deg,
            };
            sample(cfg, ReplayToken { seed, index }, &out)
        }
        Action::Plan { input } => plan(&input),
        Action::Report => report(),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn hull(input: &Path, out: Option<&Path>) -> Result<()> {
    let points = input::read_points(input)?;
    let h = compute_hull(&points);
    tracing::info!(input = %input.display(), points = points.len(), hull = h.len(), "hull");
    if h.len() < geozone::cfg::MIN_POLYGON_POINTS {
        tracing::warn!(hull = h.len(), "result is not a polygon");
    }
    match out {
        Some(out) => {
            write_json(out, &h)?;
            let step = Step::Hull {
                points: points.len(),
                vertices: h.len(),
            };
            write_sidecar(out, Some(input), &step)?;
        }
        None => println!("{}", serde_json::to_string_pretty(&h)?),
    }
    Ok(())
}

fn zone(input: &Path, id: String, name: Option<String>, style: ZoneStyle, out: &Path) -> Result<()> {
    let points = input::read_points(input)?;
    let mut z = Zone::build(id, &points, style)
        .with_context(|| format!("building zone from {}", input.display()))?;
    if let Some(name) = name {
        z = z.with_name(name);
    }
    tracing::info!(id = %z.id, name = %z.name, source = z.source_len, hull = z.boundary.len(), "zone");
    write_json(out, &z)?;
    let step = Step::Zone {
        id: z.id.clone(),
        name: z.name.clone(),
        color: z.style.color.clone(),
        points: z.source_len,
        vertices: z.boundary.len(),
    };
    write_sidecar(out, Some(input), &step)?;
    Ok(())
}

fn sample(cfg: ScatterCfg, tok: ReplayToken, out: &Path) -> Result<()> {
    let points = scatter(cfg, tok);
    tracing::info!(seed = tok.seed, index = tok.index, points = points.len(), "sample");
    write_json(out, &points)?;
    let step = Step::Sample {
        seed: tok.seed,
        index: tok.index,
        points: points.len(),
        center: cfg.center,
        spread_m: cfg.spread_m,
        snap_deg: cfg.snap_deg,
    };
    write_sidecar(out, None, &step)?;
    Ok(())
}

fn plan(input: &Path) -> Result<()> {
    let sink = session::replay(input::read_plan(input)?);
    println!("{}", serde_json::to_string_pretty(&sink.commands)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "geozone": geozone::VERSION,
        "presets": PolygonPreset::ALL,
        "marker_kinds": MarkerKind::ALL
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
