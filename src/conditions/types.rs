//! core types for the condition system

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::value::Value;

/// named comparison kinds supported in conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionKind {
    /// trigger value is truthy
    True,
    /// trigger value is falsy
    False,
    /// trigger value is absent, null, or otherwise falsy
    Empty,
    /// negation of empty
    NotEmpty,
    /// trigger value is null or the field is missing
    Null,
    /// negation of null
    NotNull,
    /// numeric: trigger < compare
    LessThan,
    /// numeric: trigger > compare
    GreaterThan,
    /// numeric equality
    Equal,
    /// numeric inequality
    NotEqual,
    /// numeric: within an inclusive [low, high] pair
    Between,
    /// trigger value matches a regular expression
    Matches,
    /// unrecognized kind, preserved verbatim; never satisfied
    Unknown(String),
}

impl ConditionKind {
    /// parse a kind from its schema string; unknown strings are kept
    pub fn parse(s: &str) -> Self {
        match s {
            "true" => ConditionKind::True,
            "false" => ConditionKind::False,
            "empty" => ConditionKind::Empty,
            "not empty" => ConditionKind::NotEmpty,
            "null" => ConditionKind::Null,
            "not null" => ConditionKind::NotNull,
            "less than" => ConditionKind::LessThan,
            "greater than" => ConditionKind::GreaterThan,
            "equal" => ConditionKind::Equal,
            "not equal" => ConditionKind::NotEqual,
            "between" => ConditionKind::Between,
            "matches" => ConditionKind::Matches,
            other => ConditionKind::Unknown(other.to_string()),
        }
    }

    /// the schema string for this kind
    pub fn as_str(&self) -> &str {
        match self {
            ConditionKind::True => "true",
            ConditionKind::False => "false",
            ConditionKind::Empty => "empty",
            ConditionKind::NotEmpty => "not empty",
            ConditionKind::Null => "null",
            ConditionKind::NotNull => "not null",
            ConditionKind::LessThan => "less than",
            ConditionKind::GreaterThan => "greater than",
            ConditionKind::Equal => "equal",
            ConditionKind::NotEqual => "not equal",
            ConditionKind::Between => "between",
            ConditionKind::Matches => "matches",
            ConditionKind::Unknown(s) => s,
        }
    }

    /// check if this kind is one of the recognized ones
    pub fn is_known(&self) -> bool {
        !matches!(self, ConditionKind::Unknown(_))
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ConditionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ConditionKind::parse(&s))
    }
}

/// how a list of conditions combines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// every condition must hold
    All,
    /// at least one condition must hold
    #[default]
    Any,
}

/// a single comparison: a field reference, a kind, and an optional
/// compare value
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Condition {
    /// field whose current value is tested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// comparison kind
    pub when: ConditionKind,
    /// value to compare against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Condition {
    /// create a condition on a named field
    pub fn on(field: impl Into<String>, when: ConditionKind, value: Option<Value>) -> Self {
        Self {
            field: Some(field.into()),
            when,
            value,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.as_deref().unwrap_or("?");
        match &self.value {
            Some(v) => write!(f, "{} {} {}", field, self.when, v),
            None => write!(f, "{} {}", field, self.when),
        }
    }
}

/// a single condition or an ordered list of them; schemas may write
/// either shape
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ConditionSet {
    /// one bare condition
    One(Condition),
    /// an ordered list
    Many(Vec<Condition>),
}

impl ConditionSet {
    /// view the set as a slice, normalizing the single form
    pub fn as_slice(&self) -> &[Condition] {
        match self {
            ConditionSet::One(c) => std::slice::from_ref(c),
            ConditionSet::Many(list) => list,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}
