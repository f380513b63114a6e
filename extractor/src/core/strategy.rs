//! Induced strategy file (`.tra`) decoding.
//!
//! ```text
//! 4 5 7
//! 0 0 1 0.6 move1
//! 1 0 2 0.5 move2
//! 1 0 3 0.5 move2
//! ```
//!
//! The header line (state/choice/transition counts) is discarded.

use std::collections::BTreeMap;

use anyhow::{Result, bail};

use crate::core::types::{ChoiceId, StateId, Transition};

/// Transition relation keyed by `(state, choice)`.
///
/// Each state's selected choice is the first choice seen for it while
/// streaming rows. Rows for other choices are kept but never selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    transitions: BTreeMap<(StateId, ChoiceId), Vec<Transition>>,
    selected: BTreeMap<StateId, ChoiceId>,
}

impl TransitionTable {
    /// Append a row; records `choice` as selected if `state` is new.
    pub fn push(&mut self, state: StateId, choice: ChoiceId, transition: Transition) {
        self.selected.entry(state).or_insert(choice);
        self.transitions
            .entry((state, choice))
            .or_default()
            .push(transition);
    }

    pub fn selected_choice(&self, state: StateId) -> Option<ChoiceId> {
        self.selected.get(&state).copied()
    }

    pub fn transitions(&self, state: StateId, choice: ChoiceId) -> &[Transition] {
        self.transitions
            .get(&(state, choice))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Transitions under the selected choice of `state`; empty for dead ends.
    pub fn selected_transitions(&self, state: StateId) -> &[Transition] {
        match self.selected_choice(state) {
            Some(choice) => self.transitions(state, choice),
            None => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ((StateId, ChoiceId), &[Transition])> {
        self.transitions
            .iter()
            .map(|(key, transitions)| (*key, transitions.as_slice()))
    }

    /// Number of states with at least one row.
    pub fn state_count(&self) -> usize {
        self.selected.len()
    }

    pub fn row_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }
}

/// Decode a strategy file.
///
/// Fails only when the file is empty. Rows with fewer than four tokens or with
/// unparsable numbers are skipped; the fifth token, if any, is the action.
pub fn parse_strategy(contents: &str) -> Result<TransitionTable> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        bail!("strategy file is empty");
    }

    let mut table = TransitionTable::default();
    for line in trimmed.lines().skip(1) {
        if let Some((state, choice, transition)) = parse_row(line) {
            table.push(state, choice, transition);
        }
    }
    Ok(table)
}

fn parse_row(line: &str) -> Option<(StateId, ChoiceId, Transition)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return None;
    }
    let state = parts[0].parse().ok()?;
    let choice = parts[1].parse().ok()?;
    let dest = parts[2].parse().ok()?;
    let prob: f64 = parts[3].parse().ok()?;
    if !prob.is_finite() {
        return None;
    }
    let action = parts.get(4).map(|action| action.to_string());
    Some((state, choice, Transition { dest, prob, action }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_choice_is_selected() {
        let table = parse_strategy("3 4 5\n1 2 3 1.0 a\n1 0 4 1.0 b\n0 0 1 0.6\n").expect("parse");
        assert_eq!(table.selected_choice(1), Some(2));
        assert_eq!(table.selected_choice(0), Some(0));
        assert_eq!(table.transitions(1, 0).len(), 1);
        assert_eq!(table.selected_transitions(1)[0].dest, 3);
        assert_eq!(table.selected_transitions(0)[0].action, None);
        assert!(table.selected_transitions(9).is_empty());
    }

    #[test]
    fn skips_short_and_malformed_rows() {
        let table =
            parse_strategy("header\n0 0 1\n0 0 x 0.5 a\n0 0 2 0.5 a extra\n").expect("parse");
        assert_eq!(table.row_count(), 1);
        assert_eq!(
            table.selected_transitions(0),
            [Transition {
                dest: 2,
                prob: 0.5,
                action: Some("a".to_string()),
            }]
        );
    }

    #[test]
    fn non_finite_probabilities_are_malformed() {
        let table =
            parse_strategy("3 2 3\n0 0 2 nan x\n0 0 2 inf y\n0 0 1 0.6 move1\n").expect("parse");
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.selected_transitions(0)[0].dest, 1);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let table = parse_strategy("1 1 0\n").expect("parse");
        assert_eq!(table.row_count(), 0);
        assert!(parse_strategy("\n\n").is_err());
    }
}
