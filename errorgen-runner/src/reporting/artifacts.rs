//! Artifact manager for persisting run outputs.
//!
//! Layout per site:
//!
//! ```text
//! <output_dir>/<run_id>/<site, percent-encoded>/
//!     manifest.json
//!     counts.csv
//!     counts.json
//!     summary.txt
//!     histogram.C      (only when there are numeric codes)
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{RunConfig, RunId};
use crate::reporting::histogram::{histogram_script, HistogramOptions};
use crate::reporting::summary::format_summary;
use crate::runner::SiteRun;

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub manifest: PathBuf,
    pub counts_csv: PathBuf,
    pub counts_json: PathBuf,
    pub summary: PathBuf,
    pub histogram: Option<PathBuf>,
}

/// Provenance and totals for one site's run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub site: String,
    pub input: PathBuf,
    pub draws: u64,
    pub master_seed: u64,
    pub site_seed: u64,
    pub timestamp: DateTime<Utc>,
    pub distinct_codes: usize,
    pub numeric_draws: u64,
    pub non_numeric_draws: u64,
}

#[derive(Debug, Serialize)]
struct CountRow {
    code: i64,
    count: u64,
}

/// Manages writing all artifacts for a run.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("Failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save complete artifacts for one site.
    pub fn save_run(&self, run: &SiteRun, config: &RunConfig) -> Result<ArtifactPaths> {
        let run_id = config.run_id();
        let dir = self.output_dir.join(&run_id).join(dir_name(&run.site));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create run directory {}", dir.display()))?;

        let manifest = RunManifest {
            run_id,
            site: run.site.clone(),
            input: config.input.clone(),
            draws: config.draws,
            master_seed: config.seed,
            site_seed: run.seed,
            timestamp: Utc::now(),
            distinct_codes: run.counts.numeric.len(),
            numeric_draws: run.counts.numeric_draws(),
            non_numeric_draws: run.counts.non_numeric_draws(),
        };
        let manifest_path = dir.join("manifest.json");
        write_json(&manifest_path, &manifest)?;

        let counts_csv = dir.join("counts.csv");
        write_counts_csv(&counts_csv, run)?;

        let counts_json = dir.join("counts.json");
        write_json(&counts_json, &run.counts)?;

        let summary = dir.join("summary.txt");
        std::fs::write(&summary, format_summary(&run.counts))
            .with_context(|| format!("Failed to write summary to {}", summary.display()))?;

        let histogram = match histogram_script(&run.counts, &HistogramOptions::for_stem("histogram")) {
            Some(script) => {
                let path = dir.join("histogram.C");
                std::fs::write(&path, script)
                    .with_context(|| format!("Failed to write histogram to {}", path.display()))?;
                Some(path)
            }
            None => None,
        };

        Ok(ArtifactPaths {
            dir,
            manifest: manifest_path,
            counts_csv,
            counts_json,
            summary,
            histogram,
        })
    }
}

/// Read a manifest back from disk.
pub fn read_manifest(path: &Path) -> Result<RunManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse run manifest")
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize artifact")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn write_counts_csv(path: &Path, run: &SiteRun) -> Result<()> {
    // Header written explicitly so a run with no numeric codes still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create counts CSV {}", path.display()))?;
    writer.write_record(["code", "count"])?;
    for (&code, &count) in &run.counts.numeric {
        writer.serialize(CountRow { code, count })?;
    }
    writer.flush()?;
    Ok(())
}

/// Site names come from user data; keep them to a single path component.
///
/// Percent-encodes `%` and the path separators, so distinct sites always get
/// distinct directories.
fn dir_name(site: &str) -> String {
    match site {
        "" => return "%".to_string(),
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }
    let mut name = String::with_capacity(site.len());
    for c in site.chars() {
        match c {
            '%' => name.push_str("%25"),
            '/' => name.push_str("%2F"),
            '\\' => name.push_str("%5C"),
            ':' => name.push_str("%3A"),
            _ => name.push(c),
        }
    }
    name
}
