//! Outcome accounting for an import run
//!
//! Local failures (a record that would not persist, a property that would
//! not coerce, an index that could not be built) do not abort a run; they
//! are counted here so the caller can distinguish a clean run from one
//! that completed with problems.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters accumulated over one import run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub nodes_created: usize,
    pub nodes_failed: usize,
    pub edges_created: usize,
    /// Edges whose endpoints resolved but which failed to persist
    pub edges_failed: usize,
    /// Edges referencing a node absent from the identity map
    pub edges_unresolved: usize,
    /// Properties skipped because they would not coerce or were rejected
    /// by the store
    pub properties_skipped: usize,
    pub indices_created: usize,
    /// Indices skipped because they target array-valued properties
    pub indices_skipped: usize,
    pub indices_failed: usize,
}

impl ImportReport {
    /// Number of non-fatal problems encountered.
    ///
    /// Skipped array indices are a known limitation rather than a
    /// problem and are not counted here.
    pub fn problem_count(&self) -> usize {
        self.nodes_failed
            + self.edges_failed
            + self.edges_unresolved
            + self.properties_skipped
            + self.indices_failed
    }

    pub fn has_problems(&self) -> bool {
        self.problem_count() > 0
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} edges, {} indices created; {} problems",
            self.nodes_created,
            self.edges_created,
            self.indices_created,
            self.problem_count()
        )
    }
}
