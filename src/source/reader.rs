//! Source graph access for the import pipeline
//!
//! [`SourceGraph`] is the read-side contract the importer consumes: label
//! enumeration in a stable order, the per-label schema scan result, lazy
//! record streams, and the declared index descriptions. [`MemoryGraph`] is
//! the in-memory implementation backing the JSONL reader and the tests.

use super::model::{Edge, IndexDescription, Node};
use super::value::ValueType;
use indexmap::IndexMap;

/// Read access to a source graph.
///
/// Labels enumerate in the order the source graph first observed them, so
/// repeated imports of the same graph are reproducible.
pub trait SourceGraph {
    /// Node labels in observation order
    fn node_labels(&self) -> Vec<String>;

    /// Edge labels in observation order
    fn edge_labels(&self) -> Vec<String>;

    /// Observed property key -> type map for a node label.
    ///
    /// The type of each key is inferred from the first non-null value
    /// observed for it under the label, not from a union over all values.
    fn node_key_types(&self, label: &str) -> IndexMap<String, ValueType>;

    /// Observed property key -> type map for an edge label
    fn edge_key_types(&self, label: &str) -> IndexMap<String, ValueType>;

    /// Nodes whose primary label matches, in insertion order
    fn nodes<'a>(&'a self, label: &str) -> Box<dyn Iterator<Item = &'a Node> + 'a>;

    /// Edges with the given label, in insertion order
    fn edges<'a>(&'a self, label: &str) -> Box<dyn Iterator<Item = &'a Edge> + 'a>;

    /// Indices declared by the source graph's schema metadata
    fn index_descriptions(&self) -> Vec<IndexDescription>;
}

/// In-memory source graph.
///
/// Records are bucketed by label (a node under its primary label), and the
/// per-label key->type maps are maintained incrementally as records are
/// added: the first non-null value observed for a key decides its type.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: IndexMap<String, Vec<Node>>,
    edges: IndexMap<String, Vec<Edge>>,
    node_key_types: IndexMap<String, IndexMap<String, ValueType>>,
    edge_key_types: IndexMap<String, IndexMap<String, ValueType>>,
    indices: Vec<IndexDescription>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. A node without any label is dropped silently; it could
    /// never be reached through a label enumeration anyway.
    pub fn add_node(&mut self, node: Node) {
        let Some(label) = node.primary_label().map(str::to_string) else {
            return;
        };
        let key_types = self.node_key_types.entry(label.clone()).or_default();
        observe_keys(key_types, &node.properties);
        self.nodes.entry(label).or_default().push(node);
    }

    /// Add an edge
    pub fn add_edge(&mut self, edge: Edge) {
        let key_types = self.edge_key_types.entry(edge.label.clone()).or_default();
        observe_keys(key_types, &edge.properties);
        self.edges.entry(edge.label.clone()).or_default().push(edge);
    }

    /// Declare an index
    pub fn declare_index(&mut self, description: IndexDescription) {
        self.indices.push(description);
    }

    /// Total number of nodes across all labels
    pub fn node_count(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }

    /// Total number of edges across all labels
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

fn observe_keys(
    key_types: &mut IndexMap<String, ValueType>,
    properties: &IndexMap<String, super::value::Value>,
) {
    for (key, value) in properties {
        if key_types.contains_key(key) {
            continue;
        }
        if let Some(value_type) = value.value_type() {
            key_types.insert(key.clone(), value_type);
        }
    }
}

impl SourceGraph for MemoryGraph {
    fn node_labels(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    fn edge_labels(&self) -> Vec<String> {
        self.edges.keys().cloned().collect()
    }

    fn node_key_types(&self, label: &str) -> IndexMap<String, ValueType> {
        self.node_key_types.get(label).cloned().unwrap_or_default()
    }

    fn edge_key_types(&self, label: &str) -> IndexMap<String, ValueType> {
        self.edge_key_types.get(label).cloned().unwrap_or_default()
    }

    fn nodes<'a>(&'a self, label: &str) -> Box<dyn Iterator<Item = &'a Node> + 'a> {
        match self.nodes.get(label) {
            Some(nodes) => Box::new(nodes.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn edges<'a>(&'a self, label: &str) -> Box<dyn Iterator<Item = &'a Edge> + 'a> {
        match self.edges.get(label) {
            Some(edges) => Box::new(edges.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn index_descriptions(&self) -> Vec<IndexDescription> {
        self.indices.clone()
    }
}
