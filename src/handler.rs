//! form state reducer
//!
//! runs one state-update cycle per user edit: normalize the raw change,
//! apply the changed field's legacy modifiers, then apply rule-triggered
//! effects, producing exactly one next form-data snapshot. the previous
//! snapshot is never mutated.

use std::collections::HashMap;

use crate::conditions::{evaluate, ConditionError};
use crate::modifier::{self, Operation, OperandKind, ResolvedConcatSource};
use crate::schema::{ConcatSource, EffectAction, FieldDefinition, Rule, TriggerWhen};
use crate::value::{text_of, FormData, Value};

/// a raw change event from the host
///
/// hosts either forward a structured input event or call with a bare
/// value and field name; the two shapes are explicit variants instead
/// of runtime sniffing.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    /// a structured input event
    Target(TargetChange),
    /// a bare value for a named field
    Value { name: String, value: Value },
}

impl ChangeEvent {
    /// convenience constructor for the bare-value shape
    pub fn set(name: impl Into<String>, value: impl Into<Value>) -> Self {
        ChangeEvent::Value {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// the target of a structured input event
#[derive(Debug, Clone, Default)]
pub struct TargetChange {
    pub name: String,
    pub value: Value,
    /// input type; "checkbox" and "file" change how the value is read
    pub input_type: Option<String>,
    pub checked: Option<bool>,
    /// attached files, as the host represents them
    pub files: Vec<Value>,
}

/// reducer configured once with a field list and a rule list
#[derive(Debug, Clone)]
pub struct FormHandler {
    fields: Vec<FieldDefinition>,
    rules_by_name: HashMap<String, Rule>,
}

impl FormHandler {
    /// configure a handler; the last rule definition of a name wins
    pub fn new(fields: Vec<FieldDefinition>, rules: Vec<Rule>) -> Self {
        let mut rules_by_name = HashMap::new();
        for rule in rules {
            rules_by_name.insert(rule.name.clone(), rule);
        }
        Self {
            fields,
            rules_by_name,
        }
    }

    /// run one update cycle and return the next snapshot
    pub fn handle_change(
        &self,
        previous: &FormData,
        event: ChangeEvent,
    ) -> Result<FormData, ConditionError> {
        let (name, value) = normalize(event);

        let mut next = previous.clone();
        next.insert(name.clone(), value.clone());

        let Some(field) = self.fields.iter().find(|f| f.name == name) else {
            return Ok(next);
        };

        // legacy per-field modifiers, sequentially against the running
        // snapshot: a later modifier observes an earlier one's write
        for modifier in &field.modifiers {
            let Some(target) = &modifier.target else {
                continue;
            };
            if !evaluate(Some(&value), &modifier.when, modifier.value.as_ref())? {
                continue;
            }
            let result = apply_to_target(
                &next,
                target,
                modifier.op,
                modifier.kind,
                modifier.value.as_ref(),
                modifier.strict_string,
                None,
            );
            next.insert(target.clone(), Value::String(result));
        }

        // rule triggers: activation is a single bare-kind condition on
        // the just-changed value; structured when forms gate the
        // attribute override path instead and never fire here
        for trigger in &field.triggers {
            let Some(rule_name) = &trigger.rule else {
                continue;
            };
            let Some(rule) = self.rules_by_name.get(rule_name) else {
                continue;
            };
            let active = match &trigger.when {
                Some(TriggerWhen::Kind(kind)) => {
                    evaluate(Some(&value), kind, trigger.value.as_ref())?
                }
                _ => false,
            };
            if !active {
                continue;
            }

            for effect in &rule.effects {
                let Some(target) = &effect.target_field else {
                    continue;
                };
                // attribute effects belong to the override resolver
                let EffectAction::Value(value_effect) = &effect.action else {
                    continue;
                };

                let sources = match &value_effect.source_fields {
                    Some(list) if value_effect.op == Operation::Concat => {
                        Some(resolve_sources(list, &next))
                    }
                    _ => None,
                };

                let result = apply_to_target(
                    &next,
                    target,
                    value_effect.op,
                    value_effect.kind,
                    value_effect.value.as_ref(),
                    value_effect.strict_string,
                    sources.as_deref(),
                );
                next.insert(target.clone(), Value::String(result));
            }
        }

        Ok(next)
    }
}

/// build a configured change handler closure
pub fn create_form_handler(
    fields: Vec<FieldDefinition>,
    rules: Vec<Rule>,
) -> impl Fn(&FormData, ChangeEvent) -> Result<FormData, ConditionError> {
    let handler = FormHandler::new(fields, rules);
    move |previous, event| handler.handle_change(previous, event)
}

/// seed form data from field defaults; existing data wins
pub fn initialize_form_data(fields: &[FieldDefinition], existing: &FormData) -> FormData {
    let mut data = FormData::new();
    for field in fields {
        if let Some(default) = &field.default {
            data.insert(field.name.clone(), default.clone());
        }
    }
    for (name, value) in existing {
        data.insert(name.clone(), value.clone());
    }
    data
}

fn normalize(event: ChangeEvent) -> (String, Value) {
    match event {
        ChangeEvent::Target(target) => {
            let mut value = target.value;
            match target.input_type.as_deref() {
                Some("checkbox") => {
                    value = target.checked.map(Value::Bool).unwrap_or(Value::Null);
                }
                Some("file") => {
                    if let Some(first) = target.files.into_iter().next() {
                        value = first;
                    }
                }
                _ => {}
            }
            (target.name, value)
        }
        ChangeEvent::Value { name, value } => (name, value),
    }
}

/// coerce the target's current value and the effect value per
/// strictString, then apply the modification
fn apply_to_target(
    data: &FormData,
    target: &str,
    op: Operation,
    kind: OperandKind,
    effect_value: Option<&Value>,
    strict_string: bool,
    sources: Option<&[ResolvedConcatSource]>,
) -> String {
    let current = data.get(target);

    let (target_value, modifier_value) = if strict_string {
        (
            Value::String(
                current
                    .map(|v| v.text_or_empty())
                    .unwrap_or_default(),
            ),
            Value::String(text_of(effect_value)),
        )
    } else {
        (
            Value::Number(current.map(|v| v.to_number()).unwrap_or(0.0)),
            Value::Number(
                effect_value
                    .map(|v| v.to_number())
                    .unwrap_or(f64::NAN),
            ),
        )
    };

    modifier::apply(
        op,
        kind,
        &target_value,
        &modifier_value,
        strict_string,
        sources,
    )
}

fn resolve_sources(sources: &[ConcatSource], data: &FormData) -> Vec<ResolvedConcatSource> {
    sources
        .iter()
        .map(|source| ResolvedConcatSource {
            char_before: source.char_before.clone(),
            field_value: data.get(&source.field).cloned().unwrap_or(Value::Null),
            char_after: source.char_after.clone(),
        })
        .collect()
}
