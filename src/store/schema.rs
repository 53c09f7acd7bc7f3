//! Class definitions: named record classes with declared property types

use super::types::{ClassKind, PropertyType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema of one record class.
///
/// Property declarations are append-only within a run: declaring an
/// already-declared property keeps the first declaration. Records may
/// still carry undeclared properties (the schema is a constraint on what
/// it names, not a closed world).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    pub kind: ClassKind,
    pub cluster: u32,
    properties: IndexMap<String, PropertyType>,
}

impl ClassDefinition {
    pub(crate) fn new(name: impl Into<String>, kind: ClassKind, cluster: u32) -> Self {
        ClassDefinition {
            name: name.into(),
            kind,
            cluster,
            properties: IndexMap::new(),
        }
    }

    /// Declare a property. Returns whether the declaration was new.
    pub fn declare_property(&mut self, key: impl Into<String>, property_type: PropertyType) -> bool {
        let key = key.into();
        if self.properties.contains_key(&key) {
            return false;
        }
        self.properties.insert(key, property_type);
        true
    }

    /// Declared type of a property, if any
    pub fn property_type(&self, key: &str) -> Option<PropertyType> {
        self.properties.get(key).copied()
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Declared properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&str, PropertyType)> {
        self.properties.iter().map(|(key, t)| (key.as_str(), *t))
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}
