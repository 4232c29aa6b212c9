//! attribute override resolution
//!
//! derives per-field attribute overrides (hidden, readOnly, title, ...)
//! from triggers and rules, and gates static visibility/read-only
//! conditions. pure functions of the schema and the current form data;
//! safe to call on every render.
//!
//! two empty-list policies coexist here and must not be unified: an
//! empty gating list never hides or locks a field, while a trigger with
//! an empty condition list is unconditionally active.

use std::collections::HashMap;

use crate::conditions::{list_matches, CombineMode, Condition, ConditionError, ConditionSet};
use crate::schema::{EffectAction, FieldDefinition, Rule, Trigger, TriggerWhen};
use crate::value::{FormData, Value};

/// fieldName -> attribute -> override value
pub type AttributeOverrides = HashMap<String, HashMap<String, Value>>;

/// build the rule index; the last definition of a name wins
pub fn rule_index(rules: &[Rule]) -> HashMap<&str, &Rule> {
    let mut index = HashMap::new();
    for rule in rules {
        index.insert(rule.name.as_str(), rule);
    }
    index
}

/// resolve attribute overrides for every field
///
/// iteration order is schema order, then trigger order, then effect
/// order; the last writer wins for a (field, attribute) pair.
pub fn build_attribute_overrides(
    fields: &[FieldDefinition],
    rules: &[Rule],
    data: &FormData,
) -> Result<AttributeOverrides, ConditionError> {
    let index = rule_index(rules);
    let mut overrides = AttributeOverrides::new();

    for field in fields {
        for trigger in &field.triggers {
            let Some(rule_name) = &trigger.rule else {
                continue;
            };
            let Some(rule) = index.get(rule_name.as_str()) else {
                continue;
            };
            if !trigger_active(trigger, data)? {
                continue;
            }

            for effect in &rule.effects {
                let Some(target) = &effect.target_field else {
                    continue;
                };
                // value effects belong to the form handler
                let EffectAction::Attribute { prop, value } = &effect.action else {
                    continue;
                };
                overrides
                    .entry(target.clone())
                    .or_default()
                    .insert(prop.clone(), value.clone());
            }
        }
    }

    Ok(overrides)
}

/// trigger activation for the attribute override path
///
/// a trigger with no structured conditions is unconditionally active;
/// the bare kind form only gates the value-mutation path and is never
/// active here.
fn trigger_active(trigger: &Trigger, data: &FormData) -> Result<bool, ConditionError> {
    let conditions: &[Condition] = match &trigger.when {
        None => &[],
        Some(TriggerWhen::Kind(_)) => return Ok(false),
        Some(TriggerWhen::One(c)) => std::slice::from_ref(c),
        Some(TriggerWhen::Many(list)) => list,
    };

    if conditions.is_empty() {
        return Ok(true);
    }

    list_matches(conditions, trigger.mode, |f| data.get(f))
}

/// check whether a field's static conditions hide it
pub fn is_hidden(field: &FieldDefinition, data: &FormData) -> Result<bool, ConditionError> {
    let Some(conditions) = &field.conditions else {
        return Ok(false);
    };
    gate_matches(conditions.hidden_when.as_ref(), conditions.hidden_mode, data)
}

/// check whether a field's static conditions make it read-only
///
/// the field's own readOnly flag and any attribute override are layered
/// on top by the renderer.
pub fn is_read_only(field: &FieldDefinition, data: &FormData) -> Result<bool, ConditionError> {
    let Some(conditions) = &field.conditions else {
        return Ok(false);
    };
    gate_matches(
        conditions.read_only_when.as_ref(),
        conditions.read_only_mode,
        data,
    )
}

/// gating: an absent or empty condition list never matches
fn gate_matches(
    set: Option<&ConditionSet>,
    mode: CombineMode,
    data: &FormData,
) -> Result<bool, ConditionError> {
    let Some(set) = set else {
        return Ok(false);
    };
    let conditions = set.as_slice();
    if conditions.is_empty() {
        return Ok(false);
    }
    list_matches(conditions, mode, |f| data.get(f))
}
