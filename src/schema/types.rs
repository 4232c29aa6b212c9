//! serde data model for form schemas
//!
//! schemas are plain structured data supplied by the host: an ordered
//! field list and an ordered rule list, JSON- or JSON5-encoded on disk.
//! effects are discriminated at construction time into value mutations
//! and attribute overrides, so the rest of the engine never branches on
//! a `prop` string.

use serde::{Deserialize, Serialize};

use crate::conditions::{CombineMode, Condition, ConditionKind, ConditionSet};
use crate::modifier::{Operation, OperandKind};
use crate::value::{FormData, Value};

/// on-disk schema document: fields, rules, optional initial form data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FormData>,
}

/// declarative description of one form input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// unique key within the schema
    pub name: String,
    /// renderer type, resolved through the field-type registry
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// older schemas use label; consulted before title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// layout width: 25, 50, 75, or 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub read_only: bool,
    /// deprecated per-field modifiers, applied before rule triggers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<LegacyModifier>,
    /// triggers firing named rules when this field changes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<FieldConditions>,
    /// renderer-layer validation patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<crate::validate::PatternSpec>,
}

impl FieldDefinition {
    /// minimal definition for building schemas in code
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            title: None,
            label: None,
            width: None,
            default: None,
            read_only: false,
            modifiers: Vec::new(),
            triggers: Vec::new(),
            conditions: None,
            pattern: None,
        }
    }

    /// display title: label wins over title, falling back to the name
    pub fn display_title(&self) -> &str {
        self.label
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(&self.name)
    }
}

/// visibility and read-only gating for one field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_when: Option<ConditionSet>,
    #[serde(default)]
    pub hidden_mode: CombineMode,
    #[serde(default, alias = "disabledWhen", skip_serializing_if = "Option::is_none")]
    pub read_only_when: Option<ConditionSet>,
    #[serde(default)]
    pub read_only_mode: CombineMode,
}

/// a named, reusable bundle of effects referenced by triggers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub effects: Vec<RuleEffect>,
}

/// one atomic transformation a rule applies to a target field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEffect", into = "RawEffect")]
pub struct RuleEffect {
    /// field receiving the effect; effects without a target are skipped
    pub target_field: Option<String>,
    pub action: EffectAction,
}

/// what a rule effect does, discriminated by its `prop`
#[derive(Debug, Clone, PartialEq)]
pub enum EffectAction {
    /// mutate the target field's value (prop == "value"); applied only
    /// by the form handler
    Value(ValueEffect),
    /// override a non-value attribute; applied only by the attribute
    /// override resolver
    Attribute { prop: String, value: Value },
}

/// the value-mutation half of a rule effect
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEffect {
    pub op: Operation,
    pub kind: OperandKind,
    pub value: Option<Value>,
    pub strict_string: bool,
    pub source_fields: Option<Vec<ConcatSource>>,
}

/// wire shape of a rule effect before discrimination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prop: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    op: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<OperandKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strict_string: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_fields: Option<Vec<ConcatSource>>,
}

impl TryFrom<RawEffect> for RuleEffect {
    type Error = String;

    fn try_from(raw: RawEffect) -> Result<Self, Self::Error> {
        let prop = raw.prop.unwrap_or_else(|| "value".to_string());
        let action = if prop == "value" {
            let op = raw
                .op
                .ok_or_else(|| "value effect requires a type".to_string())?;
            EffectAction::Value(ValueEffect {
                op,
                kind: raw.kind.unwrap_or_default(),
                value: raw.value,
                strict_string: raw.strict_string.unwrap_or(false),
                source_fields: raw.source_fields,
            })
        } else {
            EffectAction::Attribute {
                prop,
                value: raw.value.unwrap_or(Value::Null),
            }
        };
        Ok(RuleEffect {
            target_field: raw.target_field,
            action,
        })
    }
}

impl From<RuleEffect> for RawEffect {
    fn from(effect: RuleEffect) -> Self {
        match effect.action {
            EffectAction::Value(v) => RawEffect {
                target_field: effect.target_field,
                prop: None,
                op: Some(v.op),
                kind: Some(v.kind),
                value: v.value,
                strict_string: if v.strict_string { Some(true) } else { None },
                source_fields: v.source_fields,
            },
            EffectAction::Attribute { prop, value } => RawEffect {
                target_field: effect.target_field,
                prop: Some(prop),
                op: None,
                kind: None,
                value: Some(value),
                strict_string: None,
                source_fields: None,
            },
        }
    }
}

/// one source of a concat effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcatSource {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_after: Option<String>,
}

/// attached to a field; fires its referenced rule when the field's
/// value satisfies the trigger condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    /// name of the rule to fire; triggers without one are skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<TriggerWhen>,
    #[serde(default)]
    pub mode: CombineMode,
    /// compare value for the bare-kind form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// the two shapes a trigger's `when` may take
///
/// the bare kind string gates the value-mutation path against the
/// just-changed value; structured conditions gate the attribute
/// override path against the whole form. each consumer ignores the
/// other's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerWhen {
    /// bare condition kind, e.g. "true" or "greater than"
    Kind(ConditionKind),
    /// one structured condition
    One(Condition),
    /// an ordered condition list, combined per the trigger's mode
    Many(Vec<Condition>),
}

/// deprecated per-field inline form of trigger + effect
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyModifier {
    /// field receiving the modification; modifiers without one are
    /// skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(rename = "type")]
    pub op: Operation,
    #[serde(default)]
    pub kind: OperandKind,
    /// condition on the just-changed value
    pub when: ConditionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default)]
    pub strict_string: bool,
}
