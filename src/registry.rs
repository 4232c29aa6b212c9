//! field-type registry
//!
//! maps a field's `type` string to whatever the host renders it with.
//! the registry is an explicit value owned by the host process, not a
//! hidden global; hosts that mutate it from multiple threads must
//! synchronize it themselves. entries can be overwritten but never
//! removed.

use std::collections::HashMap;

/// registry of field renderers, keyed by type name
#[derive(Debug, Clone)]
pub struct FieldTypeRegistry<T> {
    entries: HashMap<String, T>,
}

impl<T> FieldTypeRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// register a renderer for a type name, replacing any existing one
    pub fn register(&mut self, type_name: impl Into<String>, entry: T) {
        self.entries.insert(type_name.into(), entry);
    }

    /// look up the renderer for a type name
    pub fn lookup(&self, type_name: &str) -> Option<&T> {
        self.entries.get(type_name)
    }

    /// registered type names, in no particular order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> FieldTypeRegistry<T> {
    /// a copy of the current entries; later registrations do not show
    /// up in the snapshot
    pub fn snapshot(&self) -> HashMap<String, T> {
        self.entries.clone()
    }
}

impl<T> Default for FieldTypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
