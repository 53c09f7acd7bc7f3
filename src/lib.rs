//! Sylva
//!
//! An embedded property-graph database populated by importing an on-disk
//! workspace source graph. The source format is schemaless per record, so
//! the importer infers a per-label schema from observed data, coerces
//! runtime-typed property values into the store's type system, remaps
//! source node identifiers to native record identities, and applies the
//! source's declared indices after bulk load.
//!
//! # Architecture
//!
//! - [`source`]: source graph model, the [`source::SourceGraph`] read
//!   contract, and the JSONL workspace reader
//! - [`store`]: the embedded store: classes, records, indices, snapshots
//! - [`import`]: the pipeline: type coercion, schema building, node and
//!   edge import, index creation, orchestration
//! - [`workspace`]: workspace layout and checksum-based staleness
//! - [`update`]: best-effort release feed check
//!
//! # Example
//!
//! ```rust
//! use sylva::import::GraphImporter;
//! use sylva::source::{MemoryGraph, Node, Edge};
//! use sylva::store::Database;
//!
//! let mut graph = MemoryGraph::new();
//! graph.add_node(Node::new(1, "Gene").with_property("name", "TP53"));
//! graph.add_node(Node::new(2, "Gene").with_property("name", "EGFR"));
//! graph.add_edge(Edge::new(5, "INTERACTS_WITH", 1, 2));
//!
//! let mut db = Database::new();
//! let report = GraphImporter::new(&graph).run(&mut db).unwrap();
//! assert_eq!(report.nodes_created, 2);
//! assert_eq!(report.edges_created, 1);
//! assert_eq!(db.record_count("Gene"), 2);
//! ```

#![warn(clippy::all)]

pub mod import;
pub mod source;
pub mod store;
pub mod update;
pub mod workspace;

// Re-export main types for convenience
pub use import::{GraphImporter, IdentityMap, ImportError, ImportReport, ImportResult};
pub use source::{
    Edge, IndexDescription, IndexTarget, IndexType, MemoryGraph, Node, SourceError, SourceGraph,
    SourceResult, Value, ValueType,
};
pub use store::{
    ClassDefinition, ClassKind, Database, PropertyType, Record, RecordId, ScalarType, StoreError,
    StoreResult,
};
pub use workspace::{Workspace, WorkspaceError, WorkspaceResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
