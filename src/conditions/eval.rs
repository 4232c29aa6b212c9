//! condition evaluator
//!
//! evaluates a condition kind against a trigger value, and combines
//! ordered condition lists with all/any semantics

use regex::Regex;
use thiserror::Error;

use super::types::{CombineMode, Condition, ConditionKind};
use crate::value::{number_of, text_of, Value};

/// error surfaced by condition evaluation
///
/// only `matches` can fail; every other kind is total. callers that
/// cannot tolerate a bad pattern must guard it themselves.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("invalid pattern in matches condition: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// evaluate one condition kind against a trigger value
///
/// `trigger` is `None` when the field is missing from the form data.
/// unrecognized kinds are never satisfied.
pub fn evaluate(
    trigger: Option<&Value>,
    when: &ConditionKind,
    value: Option<&Value>,
) -> Result<bool, ConditionError> {
    let truthy = trigger.map(Value::is_truthy).unwrap_or(false);
    let numeric = number_of(trigger);

    let result = match when {
        ConditionKind::True => truthy,
        ConditionKind::False => !truthy,
        ConditionKind::Empty => !truthy,
        ConditionKind::NotEmpty => truthy,
        ConditionKind::Null => matches!(trigger, None | Some(Value::Null)),
        ConditionKind::NotNull => !matches!(trigger, None | Some(Value::Null)),
        // NaN operands fall out of every ordered comparison
        ConditionKind::LessThan => numeric < number_of(value),
        ConditionKind::GreaterThan => numeric > number_of(value),
        ConditionKind::Equal => numeric == number_of(value),
        ConditionKind::NotEqual => numeric != number_of(value),
        ConditionKind::Between => {
            let (low, high) = match value {
                Some(Value::List(pair)) => (number_of(pair.first()), number_of(pair.get(1))),
                _ => (f64::NAN, f64::NAN),
            };
            numeric >= low && numeric <= high
        }
        ConditionKind::Matches => {
            // a missing pattern compiles to the empty regex
            let pattern = value.map(|v| v.to_string()).unwrap_or_default();
            let re = Regex::new(&pattern)?;
            re.is_match(&text_of(trigger))
        }
        ConditionKind::Unknown(_) => false,
    };

    Ok(result)
}

/// combine an ordered condition list with all/any semantics
///
/// `resolve` maps a condition's field reference to its current value.
/// evaluation short-circuits in declaration order. the empty-list
/// policies differ per call site and live there, not here.
pub fn list_matches<'a, F>(
    conditions: &[Condition],
    mode: CombineMode,
    resolve: F,
) -> Result<bool, ConditionError>
where
    F: Fn(&str) -> Option<&'a Value>,
{
    match mode {
        CombineMode::All => {
            for c in conditions {
                if !condition_matches(c, &resolve)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        CombineMode::Any => {
            for c in conditions {
                if condition_matches(c, &resolve)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn condition_matches<'a, F>(condition: &Condition, resolve: &F) -> Result<bool, ConditionError>
where
    F: Fn(&str) -> Option<&'a Value>,
{
    let trigger = condition.field.as_deref().and_then(resolve);
    evaluate(trigger, &condition.when, condition.value.as_ref())
}
