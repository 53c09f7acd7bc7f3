//! Hash-based property indices with optional uniqueness
//!
//! An index maps one property's values to the records holding them.
//! Null-ignoring indices exclude records lacking the property instead of
//! indexing them under a null key. Floats are keyed by their bit patterns
//! so they can participate in hashing.

use super::types::RecordId;
use crate::source::Value;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Hashable key form of a scalar property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKey {
    Null,
    String(String),
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    Byte(i8),
    Short(i16),
}

impl IndexKey {
    /// Key form of a value; arrays and raw collections are not indexable.
    pub fn from_value(value: &Value) -> Option<IndexKey> {
        Some(match value {
            Value::Null => IndexKey::Null,
            Value::String(s) => IndexKey::String(s.clone()),
            Value::Boolean(b) => IndexKey::Boolean(*b),
            Value::Integer(i) => IndexKey::Integer(*i),
            Value::Long(i) => IndexKey::Long(*i),
            Value::Float(v) => IndexKey::Float(v.to_bits()),
            Value::Double(v) => IndexKey::Double(v.to_bits()),
            Value::Byte(v) => IndexKey::Byte(*v),
            Value::Short(v) => IndexKey::Short(*v),
            _ => return None,
        })
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Null => write!(f, "null"),
            IndexKey::String(s) => write!(f, "{}", s),
            IndexKey::Boolean(b) => write!(f, "{}", b),
            IndexKey::Integer(i) => write!(f, "{}", i),
            IndexKey::Long(i) => write!(f, "{}", i),
            IndexKey::Float(bits) => write!(f, "{}", f32::from_bits(*bits)),
            IndexKey::Double(bits) => write!(f, "{}", f64::from_bits(*bits)),
            IndexKey::Byte(v) => write!(f, "{}", v),
            IndexKey::Short(v) => write!(f, "{}", v),
        }
    }
}

/// Index over one property of one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyIndex {
    pub class: String,
    pub property: String,
    pub unique: bool,
    pub ignore_nulls: bool,
    entries: HashMap<IndexKey, HashSet<RecordId>>,
    by_record: HashMap<RecordId, IndexKey>,
}

impl PropertyIndex {
    pub fn new(
        class: impl Into<String>,
        property: impl Into<String>,
        unique: bool,
        ignore_nulls: bool,
    ) -> Self {
        PropertyIndex {
            class: class.into(),
            property: property.into(),
            unique,
            ignore_nulls,
            entries: HashMap::new(),
            by_record: HashMap::new(),
        }
    }

    /// Index name, `Class.property`
    pub fn name(&self) -> String {
        format!("{}.{}", self.class, self.property)
    }

    /// Check whether inserting `key` for `record` would violate
    /// uniqueness; returns the conflicting holder if so.
    pub fn conflict(&self, key: &IndexKey, record: RecordId) -> Option<RecordId> {
        if !self.unique {
            return None;
        }
        self.entries
            .get(key)?
            .iter()
            .find(|holder| **holder != record)
            .copied()
    }

    /// Insert or update the entry for a record. The caller is expected to
    /// have checked [`PropertyIndex::conflict`] first.
    pub fn insert(&mut self, key: IndexKey, record: RecordId) {
        self.remove(record);
        self.entries.entry(key.clone()).or_default().insert(record);
        self.by_record.insert(record, key);
    }

    /// Drop the entry for a record, if any
    pub fn remove(&mut self, record: RecordId) {
        if let Some(previous) = self.by_record.remove(&record) {
            if let Some(holders) = self.entries.get_mut(&previous) {
                holders.remove(&record);
                if holders.is_empty() {
                    self.entries.remove(&previous);
                }
            }
        }
    }

    /// Records indexed under a key
    pub fn get(&self, key: &IndexKey) -> Vec<RecordId> {
        self.entries
            .get(key)
            .map(|records| records.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.by_record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_record.is_empty()
    }
}
