//! Test-only helpers for writing strategy exports to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::artifact_set::ArtifactSet;

/// Labels of the three-state reference scenario (init = 0, goal = 2).
pub const SCENARIO_LABELS: &str = "0=\"init\" 1=\"goal\"\n0: 0\n2: 1\n";
/// States of the reference scenario; state 2 also satisfies `xg >= 7`.
pub const SCENARIO_STATES: &str = "(loc,xg)\n0:(0,0)\n1:(1,3)\n2:(2,7)\n";
/// Strategy of the reference scenario: 0 -(0.6)-> 1 -(0.5)-> 2.
pub const SCENARIO_STRATEGY: &str = "3 2 2\n0 0 1 0.6 move1\n1 0 2 0.5 move2\n";

/// Write `<stem>.lab`, `<stem>.sta`, `<stem>.tra` into `dir`.
pub fn write_export(
    dir: &Path,
    stem: &str,
    labels: &str,
    states: &str,
    strategy: &str,
) -> Result<ArtifactSet> {
    let set = ArtifactSet::with_stem(dir, stem);
    fs::write(&set.labels, labels).with_context(|| format!("write {}", set.labels.display()))?;
    fs::write(&set.states, states).with_context(|| format!("write {}", set.states.display()))?;
    fs::write(&set.strategy, strategy)
        .with_context(|| format!("write {}", set.strategy.display()))?;
    Ok(set)
}

/// A strategy export in its own temporary run directory.
pub struct ExportFixture {
    pub dir: TempDir,
    pub set: ArtifactSet,
}

impl ExportFixture {
    pub fn new(labels: &str, states: &str, strategy: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let set = write_export(dir.path(), "strat", labels, states, strategy)?;
        Ok(Self { dir, set })
    }

    /// The reference scenario: best path 0 → 1 → 2 with probability 0.3.
    pub fn scenario() -> Result<Self> {
        Self::new(SCENARIO_LABELS, SCENARIO_STATES, SCENARIO_STRATEGY)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Output directory inside the fixture (not created).
    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }
}
