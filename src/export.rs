//! Writes a league report to disk in the daily folder layout.
//!
//! ```text
//! <out>/nfl_injuries/nfl_injuries_2025-01-31/injury_report.json
//! <out>/nfl_injuries/nfl_injuries_2025-01-31/scraper.log
//! <out>/nfl_injuries/latest/nfl_injuries_latest.json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::pipeline::LeagueReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub folder: PathBuf,
    pub report: PathBuf,
    pub log: PathBuf,
    pub latest: PathBuf,
}

impl ExportPaths {
    pub fn new(out_dir: &Path, slug: &str, date: NaiveDate) -> Self {
        let league_dir = out_dir.join(format!("{slug}_injuries"));
        let folder = league_dir.join(format!("{slug}_injuries_{}", date.format("%Y-%m-%d")));
        Self {
            report: folder.join("injury_report.json"),
            log: folder.join("scraper.log"),
            latest: league_dir
                .join("latest")
                .join(format!("{slug}_injuries_latest.json")),
            folder,
        }
    }
}

/// Write records (stable order) and the run log for one league.
pub fn write_report(report: &LeagueReport, paths: &ExportPaths) -> Result<()> {
    let latest_dir = paths
        .latest
        .parent()
        .context("latest report path has no parent")?;
    for dir in [paths.folder.as_path(), latest_dir] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(&report.sorted_records())
        .context("Failed to serialize injury records")?;
    for target in [&paths.report, &paths.latest] {
        fs::write(target, &json).with_context(|| format!("Failed to write {}", target.display()))?;
    }

    let log = report
        .log
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&paths.log, log).with_context(|| format!("Failed to write {}", paths.log.display()))?;

    debug!(folder = %paths.folder.display(), records = report.records.len(), "Report written");
    Ok(())
}
