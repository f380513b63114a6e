//! Summary and consistency findings for `extractor inspect`.

use crate::core::artifacts::Artifacts;
use crate::core::goals::GoalSource;
use crate::core::invariants::diagnose;
use crate::core::types::StateId;
use crate::io::config::ExtractorConfig;

/// What an export contains, as seen through the configured goal rules.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOutcome {
    pub variables: Vec<String>,
    pub states: usize,
    pub strategy_states: usize,
    pub rows: usize,
    pub label_definitions: Vec<(u32, String)>,
    pub initial_state: Option<StateId>,
    pub goals: Vec<StateId>,
    pub goal_source: GoalSource,
    pub failed_states: usize,
    pub findings: Vec<String>,
}

pub fn inspect(artifacts: &Artifacts, config: &ExtractorConfig) -> InspectOutcome {
    let goals = config
        .goals
        .resolve_goals(&artifacts.labels, &artifacts.states);
    let failed_states = artifacts
        .states
        .iter()
        .filter(|(_, assignment)| config.feasibility.is_failed_assignment(assignment))
        .count();
    InspectOutcome {
        variables: artifacts.states.variables().to_vec(),
        states: artifacts.states.len(),
        strategy_states: artifacts.transitions.state_count(),
        rows: artifacts.transitions.row_count(),
        label_definitions: artifacts
            .labels
            .definitions()
            .map(|(id, name)| (id, name.to_string()))
            .collect(),
        initial_state: config.goals.initial_state(&artifacts.labels),
        goals: goals.states.into_iter().collect(),
        goal_source: goals.source,
        failed_states,
        findings: diagnose(artifacts),
    }
}
