//! Extractor configuration (TOML).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::feasibility::FeasibilityConfig;
use crate::core::goals::GoalConfig;
use crate::core::search::SearchConfig;

/// Extractor configuration.
///
/// Every field is optional in the file; missing fields take the defaults that
/// match the disaster-response scenario encoding (`loc*` = -1 failure,
/// `xg >= 7` goal fallback, 100-step bound).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractorConfig {
    pub search: SearchConfig,
    pub feasibility: FeasibilityConfig,
    pub goals: GoalConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// File name of the text report written into the output directory.
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_name: "optimal_path.txt".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.search.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(anyhow!("search.tolerance must be finite and >= 0"));
        }
        if self.feasibility.location_prefix.is_empty() {
            return Err(anyhow!("feasibility.location_prefix must be non-empty"));
        }
        if self.goals.init_label.trim().is_empty() || self.goals.goal_label.trim().is_empty() {
            return Err(anyhow!("goals.init_label and goals.goal_label must be non-empty"));
        }
        if self.goals.fallback_variable.trim().is_empty() {
            return Err(anyhow!("goals.fallback_variable must be non-empty"));
        }
        if !self.goals.fallback_threshold.is_finite() {
            return Err(anyhow!("goals.fallback_threshold must be finite"));
        }
        let file_name = &self.report.file_name;
        if file_name.trim().is_empty() || file_name.contains(['/', '\\']) {
            return Err(anyhow!(
                "report.file_name must be a bare file name, got {:?}",
                file_name
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ExtractorConfig::default()`.
pub fn load_config(path: &Path) -> Result<ExtractorConfig> {
    if !path.exists() {
        let cfg = ExtractorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ExtractorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ExtractorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
