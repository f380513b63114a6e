//! Failed-state predicate.

use serde::{Deserialize, Serialize};

use crate::core::states::StateTable;
use crate::core::types::{Assignment, StateId};

/// A state is failed when any variable named with `location_prefix` holds the
/// integer `failed_sentinel` (a team left without a valid location).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeasibilityConfig {
    pub location_prefix: String,
    pub failed_sentinel: i64,
}

impl Default for FeasibilityConfig {
    fn default() -> Self {
        Self {
            location_prefix: "loc".to_string(),
            failed_sentinel: -1,
        }
    }
}

impl FeasibilityConfig {
    pub fn is_failed_assignment(&self, assignment: &Assignment) -> bool {
        assignment.iter().any(|(var, value)| {
            var.starts_with(&self.location_prefix)
                && value.as_i64() == Some(self.failed_sentinel)
        })
    }

    /// States missing from the table are never failed.
    pub fn is_failed(&self, states: &StateTable, state: StateId) -> bool {
        states
            .get(state)
            .is_some_and(|assignment| self.is_failed_assignment(assignment))
    }
}
