//! Stored records

use super::types::RecordId;
use crate::source::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A record stored under a class: a vertex, or an edge linking two
/// previously created records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub class: String,
    pub from: Option<RecordId>,
    pub to: Option<RecordId>,
    pub properties: IndexMap<String, Value>,
}

impl Record {
    pub(crate) fn new_vertex(id: RecordId, class: impl Into<String>) -> Self {
        Record {
            id,
            class: class.into(),
            from: None,
            to: None,
            properties: IndexMap::new(),
        }
    }

    pub(crate) fn new_edge(
        id: RecordId,
        class: impl Into<String>,
        from: RecordId,
        to: RecordId,
    ) -> Self {
        Record {
            id,
            class: class.into(),
            from: Some(from),
            to: Some(to),
            properties: IndexMap::new(),
        }
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn is_edge(&self) -> bool {
        self.from.is_some()
    }
}
