//! renderer-layer pattern validation
//!
//! checks a field's `pattern` declaration against the current value and
//! reports the first failing check's message. invalid patterns are
//! skipped here, while the `matches` condition surfaces them; the two
//! policies are distinct and must not be unified.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::Value;

const DEFAULT_MESSAGE: &str = "Invalid format";

/// a field's pattern declaration: one check or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    One(PatternCheck),
    Many(Vec<PatternCheck>),
}

impl PatternSpec {
    fn checks(&self) -> &[PatternCheck] {
        match self {
            PatternSpec::One(check) => std::slice::from_ref(check),
            PatternSpec::Many(list) => list,
        }
    }
}

/// one validation pattern, bare or with a custom message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternCheck {
    Bare(String),
    Detailed {
        regex: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl PatternCheck {
    fn regex(&self) -> &str {
        match self {
            PatternCheck::Bare(s) => s,
            PatternCheck::Detailed { regex, .. } => regex,
        }
    }

    fn message(&self) -> &str {
        match self {
            PatternCheck::Bare(_) => DEFAULT_MESSAGE,
            PatternCheck::Detailed { message, .. } => {
                message.as_deref().unwrap_or(DEFAULT_MESSAGE)
            }
        }
    }
}

/// validate a value against a pattern spec
///
/// returns the first failing check's message, or `None` when every
/// check passes. checks whose pattern does not compile are ignored.
pub fn pattern_error(spec: &PatternSpec, value: Option<&Value>) -> Option<String> {
    let text = value.map(|v| v.text_or_empty()).unwrap_or_default();

    for check in spec.checks() {
        let Ok(re) = Regex::new(check.regex()) else {
            continue;
        };
        if !re.is_match(&text) {
            return Some(check.message().to_string());
        }
    }

    None
}
