//! The three decoded strategy-export tables, parsed together.

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::labels::{LabelTable, parse_labels};
use crate::core::states::{StateTable, parse_states};
use crate::core::strategy::{TransitionTable, parse_strategy};

/// Raw contents of a label, state, and strategy export.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactSources<'a> {
    pub labels: &'a str,
    pub states: &'a str,
    pub strategy: &'a str,
}

/// Parsed strategy export. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artifacts {
    pub labels: LabelTable,
    pub states: StateTable,
    pub transitions: TransitionTable,
}

impl Artifacts {
    pub fn parse(sources: ArtifactSources<'_>) -> Result<Self> {
        let labels = parse_labels(sources.labels).context("parse labels")?;
        let states = parse_states(sources.states).context("parse states")?;
        let transitions = parse_strategy(sources.strategy).context("parse strategy")?;
        debug!(
            labelled_states = labels.labelled_states().count(),
            states = states.len(),
            variables = states.variables().len(),
            strategy_states = transitions.state_count(),
            rows = transitions.row_count(),
            "artifacts parsed"
        );
        Ok(Self {
            labels,
            states,
            transitions,
        })
    }
}
