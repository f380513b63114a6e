//! Initial and goal state resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::labels::LabelTable;
use crate::core::states::StateTable;
use crate::core::types::StateId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalConfig {
    /// Label marking the initial state.
    pub init_label: String,

    /// Label marking goal states.
    pub goal_label: String,

    /// Variable inspected when no state carries `goal_label`.
    pub fallback_variable: String,

    /// States whose `fallback_variable` is at least this value become goals.
    pub fallback_threshold: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            init_label: "init".to_string(),
            goal_label: "goal".to_string(),
            fallback_variable: "xg".to_string(),
            fallback_threshold: 7.0,
        }
    }
}

/// How the goal set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSource {
    Label,
    Threshold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSet {
    pub states: BTreeSet<StateId>,
    pub source: GoalSource,
}

impl GoalSet {
    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains(&state)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl GoalConfig {
    /// The lowest-numbered state carrying the init label.
    pub fn initial_state(&self, labels: &LabelTable) -> Option<StateId> {
        labels.states_with(&self.init_label).next()
    }

    /// Labelled goals, or the value-threshold fallback when none are labelled.
    pub fn resolve_goals(&self, labels: &LabelTable, states: &StateTable) -> GoalSet {
        let labelled: BTreeSet<StateId> = labels.states_with(&self.goal_label).collect();
        if !labelled.is_empty() {
            return GoalSet {
                states: labelled,
                source: GoalSource::Label,
            };
        }

        warn!(
            label = %self.goal_label,
            variable = %self.fallback_variable,
            threshold = self.fallback_threshold,
            "no goal label found; inferring goals from variable threshold"
        );
        let inferred = states
            .iter()
            .filter(|(_, assignment)| {
                assignment
                    .get(&self.fallback_variable)
                    .and_then(|value| value.as_f64())
                    .is_some_and(|value| value >= self.fallback_threshold)
            })
            .map(|(state, _)| state)
            .collect();
        GoalSet {
            states: inferred,
            source: GoalSource::Threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labels::parse_labels;
    use crate::core::states::parse_states;

    #[test]
    fn initial_state_is_lowest_init_labelled() {
        let labels = parse_labels("0=\"init\"\n7: 0\n3: 0\n").expect("labels");
        assert_eq!(GoalConfig::default().initial_state(&labels), Some(3));
    }

    #[test]
    fn missing_init_label_yields_none() {
        let labels = parse_labels("0=\"goal\"\n1: 0\n").expect("labels");
        assert_eq!(GoalConfig::default().initial_state(&labels), None);
    }

    #[test]
    fn labelled_goals_take_precedence() {
        let labels = parse_labels("0=\"init\" 1=\"goal\"\n0: 0\n2: 1\n").expect("labels");
        let states = parse_states("(loc,xg)\n0:(0,0)\n1:(1,9)\n2:(2,3)\n").expect("states");
        let goals = GoalConfig::default().resolve_goals(&labels, &states);
        assert_eq!(goals.source, GoalSource::Label);
        assert_eq!(goals.states.into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn falls_back_to_threshold() {
        let labels = parse_labels("0=\"init\"\n0: 0\n").expect("labels");
        let states =
            parse_states("(loc,xg)\n0:(0,0)\n1:(1,6.5)\n2:(2,7)\n3:(3,high)\n").expect("states");
        let goals = GoalConfig::default().resolve_goals(&labels, &states);
        assert_eq!(goals.source, GoalSource::Threshold);
        assert!(goals.contains(2));
        assert!(!goals.contains(1));
        assert!(!goals.contains(3));
    }
}
