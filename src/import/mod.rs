//! Import pipeline: source graph into the embedded store
//!
//! The orchestrator runs three phases strictly in order against one open
//! database: schema and vertices, then edges, then indices. Fatal errors
//! (an unreadable source graph, a duplicate source node ID) abort the
//! run; failures local to a single record, property or index are logged,
//! counted in the [`ImportReport`], and do not stop the run.

pub mod coerce;
mod edges;
mod indices;
mod nodes;
mod report;
pub mod schema;

pub use coerce::CoercionError;
pub use report::ImportReport;

use crate::source::{SourceError, SourceGraph, Value};
use crate::store::{Database, RecordId, StoreError};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal import failures; everything else is accumulated as diagnostics.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("duplicate source node ID '{0}'")]
    DuplicateNodeId(u64),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Run-scoped table translating source node IDs to native record
/// identities. Built during node import, read-only afterwards.
#[derive(Debug, Default)]
pub struct IdentityMap {
    map: FxHashMap<u64, RecordId>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the identity for a source node ID.
    ///
    /// Duplicate source IDs violate the source graph's identity contract
    /// and are fatal.
    pub fn insert(&mut self, source_id: u64, record: RecordId) -> ImportResult<()> {
        if self.map.insert(source_id, record).is_some() {
            return Err(ImportError::DuplicateNodeId(source_id));
        }
        Ok(())
    }

    pub fn get(&self, source_id: u64) -> Option<RecordId> {
        self.map.get(&source_id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Orchestrates one import run of a source graph into a database.
pub struct GraphImporter<'a, G: SourceGraph> {
    source: &'a G,
}

impl<'a, G: SourceGraph> GraphImporter<'a, G> {
    pub fn new(source: &'a G) -> Self {
        GraphImporter { source }
    }

    /// Run all phases and return the accumulated report.
    pub fn run(&self, db: &mut Database) -> ImportResult<ImportReport> {
        let mut report = ImportReport::default();
        let mut identities = IdentityMap::new();

        nodes::import_nodes(self.source, db, &mut identities, &mut report)?;
        edges::import_edges(self.source, db, &identities, &mut report)?;
        indices::build_indices(self.source, db, &mut report)?;

        info!("Import finished: {}", report);
        if report.has_problems() {
            warn!("Import completed with {} problems", report.problem_count());
        }
        Ok(report)
    }
}

/// Coerce and set every non-ignored property on a freshly created record.
///
/// A property that will not coerce, or that the store rejects for its
/// declared type, is skipped with a diagnostic; the record and the rest
/// of the run proceed.
fn apply_properties(
    db: &mut Database,
    record: RecordId,
    source_id: u64,
    label: &str,
    properties: &IndexMap<String, Value>,
    ignored: &[&str],
    report: &mut ImportReport,
) {
    for (key, value) in properties {
        if ignored.contains(&key.as_str()) {
            continue;
        }
        let coerced = match coerce::coerce(value.clone()) {
            Ok(Some(coerced)) => coerced,
            Ok(None) => continue,
            Err(e) => {
                warn!(
                    "Illegal property '{} -> {}' for record '{}[:{}]': {}",
                    key, value, source_id, label, e
                );
                report.properties_skipped += 1;
                continue;
            }
        };
        if let Err(e) = db.set_property(record, key, coerced) {
            warn!(
                "Illegal property '{} -> {}' for record '{}[:{}]': {}",
                key, value, source_id, label, e
            );
            report.properties_skipped += 1;
        }
    }
}
