//! Maximum-probability path search over an induced strategy.
//!
//! Maximizing a product of probabilities is minimizing the sum of their
//! negative logarithms, so this is a shortest-path search on `-ln p`. It is
//! label-correcting: a state may be re-queued whenever a strictly better
//! probability reaches it, even after it was expanded.
//!
//! Queue entries point into an arena of predecessor records, one per push. The
//! path is materialized only once, by walking predecessors back from the goal.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::artifacts::Artifacts;
use crate::core::feasibility::FeasibilityConfig;
use crate::core::goals::GoalSet;
use crate::core::types::{PathStep, StateId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Longest path, in transitions, that will be expanded.
    pub max_steps: usize,

    /// Probability improvements at or below this are treated as noise.
    pub tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            tolerance: 1e-10,
        }
    }
}

/// A goal path with per-step actions resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    pub steps: Vec<PathStep>,
    pub initial_state: StateId,
    pub final_state: StateId,
    /// Product of the re-derived step probabilities.
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(FoundPath),
    /// Queue drained without reaching a goal.
    Exhausted { states_explored: usize },
}

pub struct PathSearch<'a> {
    pub artifacts: &'a Artifacts,
    pub feasibility: &'a FeasibilityConfig,
    pub goals: &'a GoalSet,
    pub config: &'a SearchConfig,
}

#[derive(Debug, Clone, Copy)]
struct Predecessor {
    state: StateId,
    parent: Option<usize>,
    /// Number of states on the path ending here.
    len: usize,
    prob: f64,
}

#[derive(Debug)]
struct QueueEntry {
    cost: f64,
    sequence: u64,
    node: usize,
}

// BinaryHeap is a max-heap: lowest cost first, then lowest sequence (FIFO).
impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PathSearch<'_> {
    pub fn run(&self, initial: StateId) -> SearchOutcome {
        let tolerance = self.config.tolerance;
        let mut arena = vec![Predecessor {
            state: initial,
            parent: None,
            len: 1,
            prob: 1.0,
        }];
        let mut best: BTreeMap<StateId, f64> = BTreeMap::from([(initial, 1.0)]);
        let mut queue = BinaryHeap::from([QueueEntry {
            cost: 0.0,
            sequence: 0,
            node: 0,
        }]);
        let mut sequence = 1;
        let mut pops = 0usize;

        while let Some(entry) = queue.pop() {
            pops += 1;
            let current = arena[entry.node];
            let best_known = best.get(&current.state).copied().unwrap_or(0.0);
            if current.prob < best_known - tolerance {
                continue;
            }
            if self
                .feasibility
                .is_failed(&self.artifacts.states, current.state)
            {
                continue;
            }
            if self.goals.contains(current.state) {
                debug!(
                    pops,
                    pushes = arena.len(),
                    states_explored = best.len(),
                    "goal reached"
                );
                let path = walk_back(&arena, entry.node);
                return SearchOutcome::Found(self.annotate(&path));
            }
            if current.len > self.config.max_steps {
                continue;
            }

            for transition in self.artifacts.transitions.selected_transitions(current.state) {
                if !transition.prob.is_finite() || transition.prob <= 0.0 {
                    continue;
                }
                let prob = current.prob * transition.prob;
                let known = best.get(&transition.dest).copied().unwrap_or(0.0);
                if prob.partial_cmp(&(known + tolerance)) != Some(Ordering::Greater) {
                    continue;
                }
                best.insert(transition.dest, prob);
                arena.push(Predecessor {
                    state: transition.dest,
                    parent: Some(entry.node),
                    len: current.len + 1,
                    prob,
                });
                queue.push(QueueEntry {
                    cost: -prob.ln(),
                    sequence,
                    node: arena.len() - 1,
                });
                sequence += 1;
            }
        }

        debug!(
            pops,
            pushes = arena.len(),
            states_explored = best.len(),
            "queue exhausted"
        );
        SearchOutcome::Exhausted {
            states_explored: best.len(),
        }
    }

    /// Build path steps and re-derive each edge from the selected choice.
    ///
    /// The total probability is recomputed from the strategy table rather than
    /// taken from the search's cumulative values.
    fn annotate(&self, path: &[(StateId, f64)]) -> FoundPath {
        let artifacts = self.artifacts;
        let mut steps: Vec<PathStep> = path
            .iter()
            .enumerate()
            .map(|(step, &(state_id, cumulative_prob))| PathStep {
                step,
                state_id,
                state: artifacts.states.get(state_id).cloned().unwrap_or_default(),
                labels: artifacts.labels.labels_of(state_id).to_vec(),
                cumulative_prob,
                action: None,
                transition_prob: None,
            })
            .collect();

        let mut probability = 1.0;
        for index in 0..steps.len().saturating_sub(1) {
            let from = steps[index].state_id;
            let to = steps[index + 1].state_id;
            let choice = artifacts.transitions.selected_choice(from).unwrap_or(0);
            let edge = artifacts
                .transitions
                .transitions(from, choice)
                .iter()
                .find(|transition| transition.dest == to);
            if let Some(edge) = edge {
                probability *= edge.prob;
                steps[index].action = edge.action.clone();
                steps[index].transition_prob = Some(edge.prob);
            }
        }

        FoundPath {
            initial_state: path[0].0,
            final_state: path[path.len() - 1].0,
            steps,
            probability,
        }
    }
}

/// States and cumulative probabilities from the root to `node`.
fn walk_back(arena: &[Predecessor], node: usize) -> Vec<(StateId, f64)> {
    let mut path = Vec::with_capacity(arena[node].len);
    let mut cursor = Some(node);
    while let Some(index) = cursor {
        let record = &arena[index];
        path.push((record.state, record.prob));
        cursor = record.parent;
    }
    path.reverse();
    path
}
