//! Workspace directory layout and staleness tracking
//!
//! A workspace holds the merged source graph at `sources/mapped.jsonl`
//! and everything this tool derives from it under `sylva/`: the database
//! snapshot and a checksum of the graph it was built from. Comparing the
//! stored checksum against the current one detects an out-of-date
//! database without re-reading the whole graph.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const GRAPH_FILE: &str = "sources/mapped.jsonl";
const DATABASE_DIR: &str = "sylva";
const DATABASE_FILE: &str = "graph.db";
const CHECKSUM_FILE: &str = "checksum.txt";

/// How many bytes to sample from each end of the graph file for the fast
/// pseudo-checksum.
const CHECKSUM_SAMPLE: u64 = 64 * 1024;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("workspace path '{0}' was not found")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// An opened workspace directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open a workspace, verifying the directory exists.
    pub fn open(path: impl Into<PathBuf>) -> WorkspaceResult<Self> {
        let root = path.into();
        if !root.is_dir() {
            return Err(WorkspaceError::NotFound(root));
        }
        info!("Using workspace directory '{}'", root.display());
        Ok(Workspace { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the merged source graph
    pub fn graph_path(&self) -> PathBuf {
        self.root.join(GRAPH_FILE)
    }

    /// Path of the database snapshot
    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_DIR).join(DATABASE_FILE)
    }

    fn checksum_path(&self) -> PathBuf {
        self.root.join(DATABASE_DIR).join(CHECKSUM_FILE)
    }

    /// Remove a previously built database snapshot, if any.
    pub fn delete_old_database(&self) -> WorkspaceResult<()> {
        let path = self.database_path();
        if path.exists() {
            info!("Removing old database...");
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Fast pseudo-checksum of the source graph: file length plus a
    /// sample from each end, hashed with SHA-256. Not a full content
    /// hash; rewriting the middle of the file in place can go unnoticed,
    /// which is acceptable for staleness detection.
    pub fn graph_checksum(&self) -> WorkspaceResult<String> {
        let path = self.graph_path();
        let mut file = File::open(&path)?;
        let length = file.metadata()?.len();

        let mut hasher = Sha256::new();
        hasher.update(length.to_le_bytes());
        let mut buffer = vec![0u8; CHECKSUM_SAMPLE.min(length) as usize];
        file.read_exact(&mut buffer)?;
        hasher.update(&buffer);
        if length > CHECKSUM_SAMPLE {
            file.seek(SeekFrom::End(-(buffer.len() as i64)))?;
            file.read_exact(&mut buffer)?;
            hasher.update(&buffer);
        }

        let digest = hasher.finalize();
        Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
    }

    /// Store the current graph checksum next to the database snapshot.
    pub fn store_checksum(&self) -> WorkspaceResult<()> {
        info!("Updating workspace database checksum...");
        let checksum = self.graph_checksum()?;
        std::fs::create_dir_all(self.root.join(DATABASE_DIR))?;
        std::fs::write(self.checksum_path(), checksum)?;
        Ok(())
    }

    /// Whether the database snapshot matches the current source graph.
    ///
    /// Any failure to read or compute a checksum counts as out-of-date.
    pub fn is_up_to_date(&self) -> bool {
        let stored = match std::fs::read_to_string(self.checksum_path()) {
            Ok(stored) => stored,
            Err(_) => return false,
        };
        match self.graph_checksum() {
            Ok(current) => stored.trim() == current,
            Err(e) => {
                warn!("Failed to check workspace graph checksum: {}", e);
                false
            }
        }
    }
}
