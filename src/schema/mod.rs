//! schema loading and verification

mod types;
mod verify;

pub use types::{
    ConcatSource, EffectAction, FieldConditions, FieldDefinition, FormSchema, LegacyModifier,
    Rule, RuleEffect, Trigger, TriggerWhen, ValueEffect,
};
pub use verify::verify;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// load a schema document from a JSON or JSON5 file
pub fn load(path: &Path) -> Result<FormSchema> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;

    let is_json5 = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);

    let schema: FormSchema = if is_json5 {
        json5::from_str(&content)
            .with_context(|| format!("Failed to parse schema file: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse schema file: {}", path.display()))?
    };

    Ok(schema)
}

/// save a schema document as pretty-printed JSON
pub fn save(schema: &FormSchema, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write schema file: {}", path.display()))?;

    Ok(())
}
