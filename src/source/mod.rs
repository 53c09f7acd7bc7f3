//! Source graph model and readers
//!
//! The import pipeline reads from a [`SourceGraph`]: labeled node and edge
//! collections with runtime-typed properties, a per-label schema scan, and
//! declared index descriptions.

pub mod jsonl;
pub mod model;
pub mod reader;
pub mod value;

pub use model::{Edge, IndexDescription, IndexTarget, IndexType, Node};
pub use model::{EDGE_IGNORED_FIELDS, NODE_IGNORED_FIELDS};
pub use reader::{MemoryGraph, SourceGraph};
pub use value::{Value, ValueType};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening or reading a source graph.
///
/// All of these are fatal to an import run; the importer never proceeds on
/// a partially read source graph.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read source graph '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },

    #[error("record on line {line} is missing required field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("invalid record on line {line}: {reason}")]
    Record { line: usize, reason: String },
}

pub type SourceResult<T> = Result<T, SourceError>;
