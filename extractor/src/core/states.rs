//! State enumeration file (`.sta`) decoding.
//!
//! ```text
//! (loc1,loc2,xg)
//! 0:(0,2,0)
//! 1:(1,2,3)
//! ```

use std::collections::BTreeMap;

use anyhow::{Result, bail};

use crate::core::types::{Assignment, StateId, Value};

/// Variable names in column order and the decoded assignment of each state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateTable {
    variables: Vec<String>,
    states: BTreeMap<StateId, Assignment>,
}

impl StateTable {
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn get(&self, state: StateId) -> Option<&Assignment> {
        self.states.get(&state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains_key(&state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &Assignment)> {
        self.states.iter().map(|(state, assignment)| (*state, assignment))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Decode a state enumeration file.
///
/// Fails only when the header line is missing. Rows without a colon or with an
/// unparsable state id are skipped; values are zipped positionally with the
/// header, so surplus values on either side are ignored.
pub fn parse_states(contents: &str) -> Result<StateTable> {
    let mut lines = contents.trim().lines();
    let header = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => bail!("state file is empty"),
    };

    let variables: Vec<String> = split_tuple(header).map(str::to_string).collect();
    let mut states = BTreeMap::new();
    for line in lines {
        let Some((state, values)) = line.split_once(':') else {
            continue;
        };
        let Ok(state) = state.trim().parse::<StateId>() else {
            continue;
        };
        let assignment = variables
            .iter()
            .cloned()
            .zip(split_tuple(values).map(Value::decode))
            .collect();
        states.insert(state, assignment);
    }

    Ok(StateTable { variables, states })
}

/// Split `(a,b,c)` into trimmed cells.
fn split_tuple(raw: &str) -> impl Iterator<Item = &str> {
    raw.trim()
        .trim_matches(|c| c == '(' || c == ')')
        .split(',')
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_rows_positionally() {
        let table = parse_states("(loc,xg,mode)\n0:(0,0,idle)\n1:(-1,2.5,busy)\n").expect("parse");
        assert_eq!(table.variables(), ["loc", "xg", "mode"]);
        let row = table.get(1).expect("state 1");
        assert_eq!(row.get("loc"), Some(&Value::Integer(-1)));
        assert_eq!(row.get("xg"), Some(&Value::Float(2.5)));
        assert_eq!(row.get("mode"), Some(&Value::Text("busy".to_string())));
        let order: Vec<&str> = row.iter().map(|(var, _)| var).collect();
        assert_eq!(order, vec!["loc", "xg", "mode"]);
    }

    #[test]
    fn skips_rows_without_colon_or_id() {
        let table = parse_states("(a)\n(5)\nx:(1)\n2:(3)\n").expect("parse");
        assert_eq!(table.len(), 1);
        assert!(table.contains(2));
    }

    #[test]
    fn short_rows_zip_to_shorter_side() {
        let table = parse_states("(a,b)\n0:(1)\n").expect("parse");
        assert_eq!(table.get(0).expect("row").len(), 1);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(parse_states("").is_err());
    }
}
