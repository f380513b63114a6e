//! Locating and reading strategy-export files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::core::artifacts::{ArtifactSources, Artifacts};

/// Paths to one strategy export (`.tra`, `.sta`, `.lab`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub strategy: PathBuf,
    pub states: PathBuf,
    pub labels: PathBuf,
}

impl ArtifactSet {
    pub fn new(
        strategy: impl Into<PathBuf>,
        states: impl Into<PathBuf>,
        labels: impl Into<PathBuf>,
    ) -> Self {
        Self {
            strategy: strategy.into(),
            states: states.into(),
            labels: labels.into(),
        }
    }

    /// The triple `<dir>/<stem>.tra`, `.sta`, `.lab`.
    pub fn with_stem(dir: &Path, stem: &str) -> Self {
        Self::new(
            dir.join(format!("{stem}.tra")),
            dir.join(format!("{stem}.sta")),
            dir.join(format!("{stem}.lab")),
        )
    }

    /// Read a manifest listing the strategy, state, and label paths, one per
    /// line in that order. Relative entries resolve against the manifest's
    /// directory.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
        let base = path.parent().unwrap_or(Path::new(""));
        let entries: Vec<PathBuf> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| base.join(line))
            .collect();
        match entries.as_slice() {
            [strategy, states, labels] => Ok(Self::new(strategy, states, labels)),
            _ => bail!(
                "manifest {} must list exactly 3 paths (strategy, states, labels), found {}",
                path.display(),
                entries.len()
            ),
        }
    }

    /// Pick the export inside a pipeline run directory.
    ///
    /// Prefers the reachable-only `restricted.*` triple when all three files
    /// exist, otherwise the full `strat.*` triple.
    pub fn discover(run_dir: &Path) -> Result<Self> {
        let restricted = Self::with_stem(run_dir, "restricted");
        if restricted.all_exist() {
            return Ok(restricted);
        }
        let full = Self::with_stem(run_dir, "strat");
        if full.all_exist() {
            info!(run_dir = %run_dir.display(), "restricted export missing; using full strategy");
            return Ok(full);
        }
        bail!(
            "no complete restricted.* or strat.* export in {}",
            run_dir.display()
        )
    }

    pub fn all_exist(&self) -> bool {
        [&self.strategy, &self.states, &self.labels]
            .iter()
            .all(|path| path.is_file())
    }

    /// Read and parse all three files.
    pub fn load(&self) -> Result<Artifacts> {
        let labels = read(&self.labels)?;
        let states = read(&self.states)?;
        let strategy = read(&self.strategy)?;
        Artifacts::parse(ArtifactSources {
            labels: &labels,
            states: &states,
            strategy: &strategy,
        })
        .with_context(|| format!("load export {}", self.strategy.display()))
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
