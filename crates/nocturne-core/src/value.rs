//! Free-form rule values: scalars, lists, and nested tables.
//!
//! Rule data is declarative and loosely shaped — a rule set is a tree of
//! string-keyed tables whose leaves are scalars or lists. [`RuleValue`]
//! deserializes directly from the JSON the persistence collaborator hands
//! over and is treated as read-only once loaded.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A flexible rule value that supports common types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A text value.
    String(String),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// An ordered list of rule values.
    List(Vec<RuleValue>),
    /// A string-keyed table of rule values.
    Table(HashMap<String, RuleValue>),
}

impl RuleValue {
    /// An empty table, useful as a neutral root.
    pub fn empty_table() -> Self {
        Self::Table(HashMap::new())
    }

    /// The string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content. Integral floats are accepted, since JSON
    /// sources do not always distinguish `8` from `8.0`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// The numeric content as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The list content, if this is a list value.
    pub fn as_list(&self) -> Option<&[RuleValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The table content, if this is a table value.
    pub fn as_table(&self) -> Option<&HashMap<String, RuleValue>> {
        match self {
            Self::Table(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a direct child of a table value. Returns `None` for
    /// non-table values and absent keys alike.
    pub fn get(&self, key: &str) -> Option<&RuleValue> {
        self.as_table()?.get(key)
    }
}

impl From<serde_json::Value> for RuleValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Table(HashMap::new()),
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(RuleValue::from).collect())
            }
            serde_json::Value::Object(map) => Self::Table(
                map.into_iter()
                    .map(|(k, v)| (k, RuleValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Table(_) => write!(f, "{{...}}"),
        }
    }
}
