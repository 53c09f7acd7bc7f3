//! Source graph records: nodes, edges, and declared index descriptions
//!
//! Records carry their identity and label(s) as dedicated fields, but the
//! source format also spells those out as reserved property keys for its
//! own bookkeeping. Those keys must never be materialized as properties on
//! the target side; importers filter them through the ignored-field sets.

use super::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved key carrying a record's source-local identity.
pub const ID_FIELD: &str = "__id";
/// Reserved key carrying a record's label.
pub const LABEL_FIELD: &str = "__label";
/// Reserved key carrying an edge's from-node identity.
pub const FROM_ID_FIELD: &str = "__from_id";
/// Reserved key carrying an edge's to-node identity.
pub const TO_ID_FIELD: &str = "__to_id";

/// Bookkeeping keys never materialized as node properties.
pub const NODE_IGNORED_FIELDS: [&str; 2] = [ID_FIELD, LABEL_FIELD];
/// Bookkeeping keys never materialized as edge properties.
pub const EDGE_IGNORED_FIELDS: [&str; 4] = [ID_FIELD, LABEL_FIELD, FROM_ID_FIELD, TO_ID_FIELD];

/// A node in the source graph.
///
/// The id is an opaque source-local identifier, unique within one source
/// graph and never reused. Nodes carry one or more labels; the first label
/// is the primary one and decides the target class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    pub labels: Vec<String>,
    pub properties: IndexMap<String, Value>,
}

impl Node {
    /// Create a new node with a single label
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        Node {
            id,
            labels: vec![label.into()],
            properties: IndexMap::new(),
        }
    }

    /// Create a new node with multiple labels; the first is primary
    pub fn with_labels(id: u64, labels: Vec<String>) -> Self {
        Node {
            id,
            labels,
            properties: IndexMap::new(),
        }
    }

    /// The label deciding the target class for this node
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Builder-style property assignment
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// An edge in the source graph, referencing nodes by their source IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: u64,
    pub label: String,
    pub from_id: u64,
    pub to_id: u64,
    pub properties: IndexMap<String, Value>,
}

impl Edge {
    pub fn new(id: u64, label: impl Into<String>, from_id: u64, to_id: u64) -> Self {
        Edge {
            id,
            label: label.into(),
            from_id,
            to_id,
            properties: IndexMap::new(),
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Builder-style property assignment
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Whether an index targets a node class or an edge class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexTarget {
    Node,
    Edge,
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexTarget::Node => write!(f, "node"),
            IndexTarget::Edge => write!(f, "edge"),
        }
    }
}

/// Uniqueness of a declared index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexType {
    Unique,
    NonUnique,
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexType::Unique => write!(f, "unique"),
            IndexType::NonUnique => write!(f, "non-unique"),
        }
    }
}

/// Declarative request for an index on one property of one label.
///
/// Declared by the source graph's schema metadata and consumed after bulk
/// load. `array_property` marks properties whose values are collections;
/// those are not indexable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescription {
    pub target: IndexTarget,
    pub label: String,
    pub property: String,
    pub index_type: IndexType,
    pub array_property: bool,
}

impl IndexDescription {
    pub fn new(
        target: IndexTarget,
        label: impl Into<String>,
        property: impl Into<String>,
        index_type: IndexType,
    ) -> Self {
        IndexDescription {
            target,
            label: label.into(),
            property: property.into(),
            index_type,
            array_property: false,
        }
    }

    /// Mark the indexed property as array-valued
    pub fn array(mut self) -> Self {
        self.array_property = true;
        self
    }
}
