//! value modifier engine
//!
//! computes a derived field value from an operation, an operand kind,
//! and a pair of operands (or an ordered list of concatenation
//! sources). always returns the string form of the result; field
//! values travel as strings once the engine has touched them.

use serde::{Deserialize, Serialize};

use crate::value::{format_number, Value};

/// operation applied by a modifier or rule effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Replace,
    Concat,
}

/// how the modifier operand is interpreted in math mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandKind {
    #[default]
    Number,
    /// the result is always `target * modifier / 100`, whatever the
    /// operation asked for
    Percent,
}

/// a concatenation source with its field value resolved from the
/// current snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConcatSource {
    /// text inserted before the field value
    pub char_before: Option<String>,
    /// the source field's current value
    pub field_value: Value,
    /// text inserted after the field value
    pub char_after: Option<String>,
}

/// apply one modification and return the new value as a string
///
/// never fails: unparseable numeric operands degrade to 0 (target
/// baseline) or propagate NaN, and division by zero yields
/// `"Infinity"`.
pub fn apply(
    op: Operation,
    kind: OperandKind,
    target: &Value,
    modifier: &Value,
    strict_string: bool,
    sources: Option<&[ResolvedConcatSource]>,
) -> String {
    // concatenation over sources wins over everything else
    if op == Operation::Concat {
        if let Some(sources) = sources.filter(|s| !s.is_empty()) {
            let mut result = String::new();
            for source in sources {
                if let Some(before) = &source.char_before {
                    result.push_str(before);
                }
                result.push_str(&source.field_value.text_or_empty());
                if let Some(after) = &source.char_after {
                    result.push_str(after);
                }
            }
            return result;
        }
    }

    let do_math = matches!(modifier, Value::Number(_)) && !strict_string;

    if do_math {
        let target_num = {
            let n = target.to_number();
            if n.is_nan() {
                0.0
            } else {
                n
            }
        };
        let mod_num = modifier.to_number();

        let mut result = match op {
            // concat with a numeric operand behaves as add
            Operation::Add | Operation::Concat => target_num + mod_num,
            Operation::Subtract => target_num - mod_num,
            Operation::Multiply => target_num * mod_num,
            Operation::Divide => target_num / mod_num,
            Operation::Replace => mod_num,
        };

        if kind == OperandKind::Percent {
            result = (target_num * mod_num) / 100.0;
        }

        format_number(result)
    } else {
        match op {
            Operation::Concat | Operation::Add => format!("{}{}", target, modifier),
            Operation::Replace => modifier.to_string(),
            // undefined for strings: leave the target untouched
            Operation::Subtract | Operation::Multiply | Operation::Divide => target.to_string(),
        }
    }
}
