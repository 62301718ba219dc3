//! Persisted tracking of already-ingested documents.
//!
//! Documents are identified by the SHA-256 digest of their URL string, so a
//! document is fetched at most once across runs even when the listing keeps
//! advertising it. The set lives in a small JSON file that is replaced
//! atomically on save: a crash mid-write leaves the previous file intact.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use url::Url;

use crate::error_handling::PersistError;

/// Computes the stable identity of a document URL.
///
/// # Returns
///
/// The lowercase hex SHA-256 digest of the URL string.
pub fn document_identity(url: &Url) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_str().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Set of document identities that were successfully ingested.
///
/// Owned exclusively by the orchestrator; the identity of a document is
/// inserted only after its upload succeeded, so a failed document stays
/// eligible for the next run.
#[derive(Debug, Default)]
pub struct IdentitySet {
    identities: HashSet<String>,
}

impl IdentitySet {
    /// Creates an empty identity set.
    pub fn new() -> Self {
        Self {
            identities: HashSet::new(),
        }
    }

    /// Loads the identity set from `path`.
    ///
    /// A missing file is the normal first-run state and yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when the file exists but cannot be read or
    /// does not hold a JSON string array.
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(PersistError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let identities: HashSet<String> =
            serde_json::from_slice(&raw).map_err(|e| PersistError::Malformed {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self { identities })
    }

    /// Saves the identity set to `path`, replacing any previous file.
    ///
    /// The set is written to a temporary file in the destination directory
    /// and renamed over the target, so readers never observe a partial file.
    /// Identities are sorted before serialization to keep the on-disk form
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Write`] when the temporary file cannot be
    /// created, written, or renamed into place.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let write_error = |source: std::io::Error| PersistError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut sorted: Vec<&String> = self.identities.iter().collect();
        sorted.sort();

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_error)?;
        serde_json::to_writer_pretty(&mut tmp, &sorted)
            .map_err(|e| write_error(std::io::Error::from(e)))?;
        tmp.flush().map_err(write_error)?;
        tmp.persist(path).map_err(|e| write_error(e.error))?;

        Ok(())
    }

    /// Whether the given identity has already been ingested.
    pub fn contains(&self, identity: &str) -> bool {
        self.identities.contains(identity)
    }

    /// Marks an identity as ingested.
    ///
    /// # Returns
    ///
    /// `true` if the identity was not present before.
    pub fn insert(&mut self, identity: String) -> bool {
        self.identities.insert(identity)
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
