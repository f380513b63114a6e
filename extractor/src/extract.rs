//! Extraction entry points for `extractor extract`.
//!
//! Combines the pure core (goal resolution, search, rendering) with the one
//! side effect an extraction has: writing the text report on success.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::artifacts::Artifacts;
use crate::core::report::render_report;
use crate::core::search::{FoundPath, PathSearch, SearchOutcome};
use crate::core::types::{PathStep, StateId};
use crate::io::artifact_set::ArtifactSet;
use crate::io::config::ExtractorConfig;

/// Structured extraction outcome, serialized with a `status` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExtractionResult {
    Success(ExtractionSuccess),
    Error(ExtractionError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionSuccess {
    pub path: Vec<PathStep>,
    pub num_steps: usize,
    pub txt_file: PathBuf,
    pub goal_reached: bool,
    pub optimal_path_probability: f64,
    pub initial_state: StateId,
    pub final_state: StateId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingInitialState,
    MissingGoalState,
    NoPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states_explored: Option<usize>,
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success(_))
    }
}

/// Resolve the initial and goal states and search for the best path.
pub fn find_path(
    artifacts: &Artifacts,
    config: &ExtractorConfig,
) -> std::result::Result<FoundPath, ExtractionError> {
    let initial = config
        .goals
        .initial_state(&artifacts.labels)
        .ok_or_else(|| ExtractionError {
            kind: ErrorKind::MissingInitialState,
            message: "No initial state found".to_string(),
            states_explored: None,
        })?;

    let goals = config
        .goals
        .resolve_goals(&artifacts.labels, &artifacts.states);
    if goals.is_empty() {
        return Err(ExtractionError {
            kind: ErrorKind::MissingGoalState,
            message: "No goal states found".to_string(),
            states_explored: None,
        });
    }
    debug!(
        initial,
        goals = goals.states.len(),
        source = ?goals.source,
        "search endpoints resolved"
    );

    let search = PathSearch {
        artifacts,
        feasibility: &config.feasibility,
        goals: &goals,
        config: &config.search,
    };
    match search.run(initial) {
        SearchOutcome::Found(path) => Ok(path),
        SearchOutcome::Exhausted { states_explored } => Err(ExtractionError {
            kind: ErrorKind::NoPath,
            message: format!(
                "No path to goal found within {} steps",
                config.search.max_steps
            ),
            states_explored: Some(states_explored),
        }),
    }
}

/// Run an extraction over parsed artifacts, writing the report into `out_dir`
/// on success. No file is written for error results.
pub fn extract_artifacts(
    artifacts: &Artifacts,
    out_dir: &Path,
    config: &ExtractorConfig,
) -> Result<ExtractionResult> {
    let path = match find_path(artifacts, config) {
        Ok(path) => path,
        Err(err) => {
            info!(kind = ?err.kind, states_explored = ?err.states_explored, "{}", err.message);
            return Ok(ExtractionResult::Error(err));
        }
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;
    let txt_file = out_dir.join(&config.report.file_name);
    fs::write(&txt_file, render_report(&path))
        .with_context(|| format!("write report {}", txt_file.display()))?;
    info!(
        steps = path.steps.len(),
        probability = path.probability,
        report = %txt_file.display(),
        "optimal path extracted"
    );

    Ok(ExtractionResult::Success(ExtractionSuccess {
        num_steps: path.steps.len(),
        txt_file,
        goal_reached: true,
        optimal_path_probability: path.probability,
        initial_state: path.initial_state,
        final_state: path.final_state,
        path: path.steps,
    }))
}

/// Load an export from disk and extract its optimal path.
pub fn extract(
    set: &ArtifactSet,
    out_dir: &Path,
    config: &ExtractorConfig,
) -> Result<ExtractionResult> {
    let artifacts = set.load()?;
    extract_artifacts(&artifacts, out_dir, config)
}
