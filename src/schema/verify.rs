//! schema verification
//!
//! collects human-readable problems in a schema without mutating it.
//! verification is advisory: the engine itself resolves every problem
//! listed here by silently skipping the offending step at runtime.

use std::collections::HashSet;

use regex::Regex;
use strsim::levenshtein;

use crate::conditions::{Condition, ConditionKind};
use crate::modifier::Operation;
use crate::value::Value;

use super::types::{EffectAction, FormSchema, TriggerWhen};

/// maximum edit distance for a did-you-mean suggestion
const SUGGESTION_THRESHOLD: usize = 2;

/// verify a schema and return a list of problems (empty = valid)
pub fn verify(schema: &FormSchema) -> Vec<String> {
    let mut errors = Vec::new();

    let field_names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
    let rule_names: Vec<&str> = schema.rules.iter().map(|r| r.name.as_str()).collect();

    // duplicate names
    let mut seen = HashSet::new();
    for (i, field) in schema.fields.iter().enumerate() {
        if !seen.insert(field.name.as_str()) {
            errors.push(format!(
                "fields[{}]: duplicate field name '{}'",
                i, field.name
            ));
        }
    }
    let mut seen = HashSet::new();
    for (i, rule) in schema.rules.iter().enumerate() {
        if !seen.insert(rule.name.as_str()) {
            errors.push(format!(
                "rules[{}]: duplicate rule name '{}' (last definition wins)",
                i, rule.name
            ));
        }
    }

    // fields: widths, triggers, modifiers, gating conditions
    for (i, field) in schema.fields.iter().enumerate() {
        let prefix = format!("fields[{}]", i);

        if let Some(width) = field.width {
            if !matches!(width, 25 | 50 | 75 | 100) {
                errors.push(format!(
                    "{}: width {} is not one of 25, 50, 75, 100",
                    prefix, width
                ));
            }
        }

        for (j, trigger) in field.triggers.iter().enumerate() {
            let prefix = format!("{}.triggers[{}]", prefix, j);

            match &trigger.rule {
                None => errors.push(format!("{}: missing rule name", prefix)),
                Some(name) if !rule_names.contains(&name.as_str()) => {
                    errors.push(with_suggestion(
                        format!("{}: unknown rule '{}'", prefix, name),
                        name,
                        &rule_names,
                    ));
                }
                _ => {}
            }

            match &trigger.when {
                Some(TriggerWhen::Kind(kind)) => {
                    check_kind(&mut errors, &prefix, kind, trigger.value.as_ref());
                }
                Some(TriggerWhen::One(c)) => {
                    check_condition(&mut errors, &prefix, c, &field_names);
                }
                Some(TriggerWhen::Many(list)) => {
                    for (k, c) in list.iter().enumerate() {
                        check_condition(&mut errors, &format!("{}.when[{}]", prefix, k), c, &field_names);
                    }
                }
                None => {}
            }
        }

        for (j, modifier) in field.modifiers.iter().enumerate() {
            let prefix = format!("{}.modifiers[{}]", prefix, j);

            match &modifier.target {
                None => errors.push(format!("{}: missing target field", prefix)),
                Some(target) if !field_names.contains(&target.as_str()) => {
                    errors.push(with_suggestion(
                        format!("{}: unknown target field '{}'", prefix, target),
                        target,
                        &field_names,
                    ));
                }
                _ => {}
            }

            check_kind(&mut errors, &prefix, &modifier.when, modifier.value.as_ref());
        }

        if let Some(conditions) = &field.conditions {
            for (set, label) in [
                (&conditions.hidden_when, "hiddenWhen"),
                (&conditions.read_only_when, "readOnlyWhen"),
            ] {
                if let Some(set) = set {
                    for (j, c) in set.as_slice().iter().enumerate() {
                        check_condition(
                            &mut errors,
                            &format!("{}.conditions.{}[{}]", prefix, label, j),
                            c,
                            &field_names,
                        );
                    }
                }
            }
        }
    }

    // rules: effect targets and concat sources
    for (i, rule) in schema.rules.iter().enumerate() {
        for (j, effect) in rule.effects.iter().enumerate() {
            let prefix = format!("rules[{}].effects[{}]", i, j);

            match &effect.target_field {
                None => errors.push(format!("{}: missing target field", prefix)),
                Some(target) if !field_names.contains(&target.as_str()) => {
                    errors.push(with_suggestion(
                        format!("{}: unknown target field '{}'", prefix, target),
                        target,
                        &field_names,
                    ));
                }
                _ => {}
            }

            if let EffectAction::Value(value_effect) = &effect.action {
                if let Some(sources) = &value_effect.source_fields {
                    if value_effect.op != Operation::Concat {
                        errors.push(format!(
                            "{}: sourceFields are only used by concat effects",
                            prefix
                        ));
                    }
                    for (k, source) in sources.iter().enumerate() {
                        if !field_names.contains(&source.field.as_str()) {
                            errors.push(with_suggestion(
                                format!(
                                    "{}.sourceFields[{}]: unknown field '{}'",
                                    prefix, k, source.field
                                ),
                                &source.field,
                                &field_names,
                            ));
                        }
                    }
                }
            }
        }
    }

    errors
}

fn check_condition(
    errors: &mut Vec<String>,
    prefix: &str,
    condition: &Condition,
    field_names: &[&str],
) {
    if let Some(field) = &condition.field {
        if !field_names.contains(&field.as_str()) {
            errors.push(with_suggestion(
                format!("{}: unknown field '{}'", prefix, field),
                field,
                field_names,
            ));
        }
    }
    check_kind(errors, prefix, &condition.when, condition.value.as_ref());
}

fn check_kind(
    errors: &mut Vec<String>,
    prefix: &str,
    kind: &ConditionKind,
    value: Option<&Value>,
) {
    match kind {
        ConditionKind::Unknown(s) => {
            errors.push(format!("{}: unknown condition kind '{}'", prefix, s));
        }
        ConditionKind::Between => {
            let is_pair = matches!(value, Some(Value::List(pair)) if pair.len() == 2);
            if !is_pair {
                errors.push(format!(
                    "{}: between requires a [low, high] pair as its value",
                    prefix
                ));
            }
        }
        ConditionKind::Matches => {
            let pattern = value.map(|v| v.to_string()).unwrap_or_default();
            if let Err(e) = Regex::new(&pattern) {
                errors.push(format!("{}: invalid matches pattern: {}", prefix, e));
            }
        }
        _ => {}
    }
}

fn with_suggestion(message: String, name: &str, candidates: &[&str]) -> String {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let distance = levenshtein(&name.to_lowercase(), &candidate.to_lowercase());
        if distance <= SUGGESTION_THRESHOLD && best.map(|(_, d)| distance < d).unwrap_or(true) {
            best = Some((candidate, distance));
        }
    }
    match best {
        Some((candidate, _)) => format!("{} (did you mean '{}'?)", message, candidate),
        None => message,
    }
}
