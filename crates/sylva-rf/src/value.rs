//! Typed cell values shared by feature columns and labels.

use std::cmp::Ordering;
use std::fmt;

/// A single cell of a dataset: either a finite number or a piece of text.
///
/// Values are totally ordered: every number sorts before every text, numbers
/// compare by IEEE total order and texts lexicographically. Equality agrees
/// with that order, so `Value` can key ordered maps and sets.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric cell.
    Number(f64),
    /// A textual cell.
    Text(String),
}

impl Value {
    /// Parse a raw cell.
    ///
    /// Surrounding whitespace is trimmed. Anything that parses as a finite
    /// `f64` becomes [`Value::Number`], everything else (including `NaN` and
    /// `inf`) is kept as [`Value::Text`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::from(v),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    /// Return the numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    /// Return `true` if this is a textual value.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        // -0.0 and 0.0 must compare equal under total ordering.
        if v == 0.0 { Value::Number(0.0) } else { Value::Number(v) }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}
