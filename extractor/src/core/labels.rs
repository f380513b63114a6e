//! Label file (`.lab`) decoding.
//!
//! ```text
//! 0="init" 1="deadlock" 2="goal"
//! 0: 0
//! 5: 1 2
//! ```

use std::collections::BTreeMap;

use anyhow::{Result, bail};

use crate::core::types::StateId;

/// Label id ↔ name mapping plus the labels attached to each state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    name_to_id: BTreeMap<String, u32>,
    id_to_name: BTreeMap<u32, String>,
    state_labels: BTreeMap<StateId, Vec<String>>,
}

impl LabelTable {
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.name_to_id.get(name).copied()
    }

    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    /// Labels attached to `state`, in file order. Empty if none.
    pub fn labels_of(&self, state: StateId) -> &[String] {
        self.state_labels
            .get(&state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_label(&self, state: StateId, name: &str) -> bool {
        self.labels_of(state).iter().any(|label| label == name)
    }

    /// States carrying `name`, ascending by id.
    pub fn states_with<'a>(&'a self, name: &'a str) -> impl Iterator<Item = StateId> + 'a {
        self.state_labels
            .iter()
            .filter(move |(_, labels)| labels.iter().any(|label| label == name))
            .map(|(state, _)| *state)
    }

    pub fn labelled_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.state_labels.keys().copied()
    }

    pub fn definitions(&self) -> impl Iterator<Item = (u32, &str)> {
        self.id_to_name.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

/// Decode a label file.
///
/// Fails only when the header line is missing. Body lines without a colon or
/// with unparsable ids are skipped; unknown label ids are dropped.
pub fn parse_labels(contents: &str) -> Result<LabelTable> {
    let mut lines = contents.trim().lines();
    let header = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => bail!("label file is empty"),
    };

    let mut table = LabelTable::default();
    for token in header.split_whitespace() {
        let Some((id, name)) = token.split_once('=') else {
            continue;
        };
        let Ok(id) = id.trim().parse::<u32>() else {
            continue;
        };
        let name = name.trim_matches('"').to_string();
        table.name_to_id.insert(name.clone(), id);
        table.id_to_name.insert(id, name);
    }

    for line in lines {
        let Some((state, ids)) = line.split_once(':') else {
            continue;
        };
        let Ok(state) = state.trim().parse::<StateId>() else {
            continue;
        };
        let Ok(ids) = ids
            .split_whitespace()
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
        else {
            continue;
        };
        let names = ids
            .into_iter()
            .filter_map(|id| table.id_to_name.get(&id).cloned())
            .collect();
        table.state_labels.insert(state, names);
    }

    Ok(table)
}
