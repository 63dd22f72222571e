//! Flat-file JSON document store for Folio.
//!
//! [`DocStore`] keeps each content document as a single JSON file inside one
//! data directory. Documents are arbitrary JSON values identified by filename
//! only: names never contain path separators, so a document can never resolve
//! outside the data directory.
//!
//! Reads return `{}` for missing files, so callers cannot distinguish "no such
//! document" from "document holding an empty object". That is the store's
//! contract, not an accident.
//!
//! Writes serialize the value pretty-printed (2-space indent, non-ASCII kept
//! literal) into a temporary file in the same directory, then rename it over
//! the target. Concurrent writers race, but the loser is replaced wholesale;
//! readers never observe a partially written document.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

/// Store error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document name failed validation (empty, path separators, `..`, NUL).
    #[error("Invalid document name: {0:?}")]
    InvalidName(String),

    /// I/O error, tagged with the path it occurred on.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the operation failed on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored document exists but does not hold valid JSON.
    #[error("Malformed JSON in {}: {source}", .path.display())]
    Json {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// JSON document store rooted at a data directory.
pub struct DocStore {
    data_dir: PathBuf,
}

impl DocStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// The directory itself is created lazily; see [`ensure_dir`](Self::ensure_dir).
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// The data directory this store reads and writes.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory (and parents) if it does not exist.
    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))
    }

    /// Load the named document.
    ///
    /// A missing file loads as an empty JSON object.
    pub fn load(&self, name: &str) -> Result<Value, StoreError> {
        let path = self.resolve(name)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Value::Object(serde_json::Map::new()));
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json { path, source })
    }

    /// Save the named document, replacing any previous content.
    ///
    /// The value is written pretty-printed to a temporary file in the data
    /// directory and renamed over the target, so a crash mid-write leaves the
    /// previous document intact.
    pub fn save(&self, name: &str, document: &Value) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        self.ensure_dir()?;

        let body = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        let mut tmp =
            NamedTempFile::new_in(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;
        tmp.write_all(&body).map_err(|e| StoreError::io(&path, e))?;
        tmp.persist(&path)
            .map_err(|e| StoreError::io(&path, e.error))?;

        tracing::debug!(document = %name, bytes = body.len(), "saved document");
        Ok(())
    }

    /// List document filenames ending in `suffix`, sorted.
    ///
    /// Subdirectories and non-matching entries are skipped. The data directory
    /// must exist; callers that create it lazily call [`ensure_dir`](Self::ensure_dir)
    /// first.
    pub fn list(&self, suffix: &str) -> Result<Vec<String>, StoreError> {
        let entries =
            std::fs::read_dir(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.data_dir, e))?;
            if !entry.path().is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(suffix) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Validate `name` and resolve it to a path inside the data directory.
    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.data_dir.join(name))
    }
}

/// Validate that a document name maps to a single entry inside the data
/// directory.
///
/// Rejects empty names, path separators, `.`/`..`, and NUL bytes.
fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(StoreError::InvalidName(name.to_owned()));
    }
    Ok(())
}
