//! Consistency findings the search itself does not enforce.
//!
//! Model checkers may export partial strategies, so none of these block an
//! extraction. They are reported for callers that want to validate separately.

use std::collections::BTreeMap;

use crate::core::artifacts::Artifacts;
use crate::core::types::{ChoiceId, StateId};

/// Allowed drift of a `(state, choice)` probability sum from 1.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Check strategy-export invariants:
/// - Probabilities under each `(state, choice)` sum to 1
/// - Probabilities lie in `(0, 1]`
/// - Destinations and labelled states appear in the state table
/// - Each state has rows under a single choice
///
/// Findings are ordered by state, then choice, for stable output.
pub fn diagnose(artifacts: &Artifacts) -> Vec<String> {
    let mut errors = Vec::new();
    let mut choices: BTreeMap<StateId, Vec<ChoiceId>> = BTreeMap::new();

    for ((state, choice), transitions) in artifacts.transitions.iter() {
        choices.entry(state).or_default().push(choice);

        let sum: f64 = transitions.iter().map(|transition| transition.prob).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            errors.push(format!(
                "state {state} choice {choice}: probabilities sum to {sum:.6}"
            ));
        }

        for transition in transitions {
            if !(transition.prob > 0.0 && transition.prob <= 1.0) {
                errors.push(format!(
                    "state {state} choice {choice}: probability {} to {} outside (0, 1]",
                    transition.prob, transition.dest
                ));
            }
            if !artifacts.states.contains(transition.dest) {
                errors.push(format!(
                    "state {state} choice {choice}: destination {} missing from state table",
                    transition.dest
                ));
            }
        }
    }

    for (state, choices) in &choices {
        if choices.len() > 1 {
            let selected = artifacts.transitions.selected_choice(*state);
            errors.push(format!(
                "state {state}: rows under {} choices {:?}, selected {:?}",
                choices.len(),
                choices,
                selected
            ));
        }
    }

    for state in artifacts.labels.labelled_states() {
        if !artifacts.states.contains(state) {
            errors.push(format!("labelled state {state} missing from state table"));
        }
    }

    errors
}
