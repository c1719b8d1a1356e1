//! `<artifact>.provenance.json` sidecars: which build, which input and which
//! parameters produced a file the CLI wrote.

use anyhow::{Context, Result};
use geozone::Coordinate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced the artifact.
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Step {
    Hull {
        points: usize,
        vertices: usize,
    },
    Zone {
        id: String,
        name: String,
        color: String,
        points: usize,
        vertices: usize,
    },
    Sample {
        seed: u64,
        index: u64,
        points: usize,
        center: Coordinate,
        spread_m: f64,
        snap_deg: Option<f64>,
    },
}

#[derive(Debug, Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    geozone: &'static str,
    input: Option<String>,
    output: String,
    step: &'a Step,
}

/// Write the sidecar for `artifact` and return its path.
pub fn write_sidecar(artifact: &Path, input: Option<&Path>, step: &Step) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let doc = Sidecar {
        code_rev: code_rev(),
        geozone: geozone::VERSION,
        input: input.map(|p| p.display().to_string()),
        output: artifact.display().to_string(),
        step,
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(sidecar = %path.display(), "provenance");
    Ok(path)
}

/// `zone.json` -> `zone.provenance.json`
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse`, else "unknown".
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()))
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/zone.json")),
            Path::new("/tmp/out/zone.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("out/cloud")),
            Path::new("out/cloud.provenance.json")
        );
    }

    #[test]
    fn zone_step_is_recorded_with_counts() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("zone.json");
        fs::write(&artifact, "{}").unwrap();
        let step = Step::Zone {
            id: "zone-1".into(),
            name: "Yard".into(),
            color: "#4FC3F7".into(),
            points: 5,
            vertices: 4,
        };
        let path = write_sidecar(&artifact, Some(Path::new("pts.csv")), &step).unwrap();
        let v: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(v["geozone"], geozone::VERSION);
        assert_eq!(v["input"], "pts.csv");
        assert_eq!(v["output"], artifact.display().to_string());
        assert_eq!(v["step"]["cmd"], "zone");
        assert_eq!(v["step"]["points"], 5);
        assert_eq!(v["step"]["vertices"], 4);
    }

    #[test]
    fn sample_step_has_no_input() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("cloud.json");
        fs::write(&artifact, "[]").unwrap();
        let step = Step::Sample {
            seed: 7,
            index: 2,
            points: 32,
            center: Coordinate::new(37.5665, 126.978),
            spread_m: 500.0,
            snap_deg: None,
        };
        let path = write_sidecar(&artifact, None, &step).unwrap();
        let v: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert!(v["input"].is_null());
        assert_eq!(v["step"]["cmd"], "sample");
        assert_eq!(v["step"]["center"]["lat"], 37.5665);
        assert!(v["step"]["snap_deg"].is_null());
    }
}
