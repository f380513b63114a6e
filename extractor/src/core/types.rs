//! Shared deterministic types for the extraction core.
//!
//! These types define stable contracts between the parser, the search, and the
//! report builder. They do not depend on external state or I/O and serialize
//! identically across runs.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Model-checker state index (row id in the state enumeration).
pub type StateId = u64;

/// Nondeterministic choice index within a state.
pub type ChoiceId = u32;

/// Variable name → decoded value for one state.
///
/// Entries keep the column order of the state file header, which is also the
/// order they are rendered and serialized in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    entries: Vec<(String, Value)>,
}

impl Assignment {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(var, _)| var == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(var, value)| (var.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (var, value) in &self.entries {
            map.serialize_entry(var, value)?;
        }
        map.end()
    }
}

/// A single decoded cell of the state enumeration.
///
/// Decoding rule: a token containing `.` is tried as a float, any other token
/// as an integer; tokens that fail their numeric parse are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn decode(token: &str) -> Self {
        let token = token.trim();
        if token.contains('.') {
            if let Ok(value) = token.parse::<f64>() {
                return Value::Float(value);
            }
        } else if let Ok(value) = token.parse::<i64>() {
            return Value::Integer(value);
        }
        Value::Text(token.to_string())
    }

    /// Numeric view of the value; text has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            Value::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            // Keep a trailing `.0` so floats stay distinguishable from integers.
            Value::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
        }
    }
}

/// One outgoing edge of a `(state, choice)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub dest: StateId,
    pub prob: f64,
    pub action: Option<String>,
}

/// One state on the extracted path.
///
/// `action` and `transition_prob` describe the edge taken out of this step and
/// are `None` on the final step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub step: usize,
    pub state_id: StateId,
    pub state: Assignment,
    pub labels: Vec<String>,
    pub cumulative_prob: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_prob: Option<f64>,
}
