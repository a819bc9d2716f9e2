//! Archive client trait and structured error types.
//!
//! The ArchiveClient trait abstracts over the competition-archive API so the
//! fetcher can be exercised against a fake without network access.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("download of '{file}' failed: {reason}")]
    Download { file: String, reason: String },

    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("filesystem error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl DataError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn download(file: &str, reason: impl Into<String>) -> Self {
        DataError::Download {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}

/// Where a dataset file came from on this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileSource {
    /// Already present locally; no network call made.
    Cache,
    /// Fetched from the competition archive.
    Downloaded,
}

/// Client for an authenticated competition-file archive.
///
/// Implementations handle credentials and transport. The fetcher decides
/// whether a download is needed; clients never look at the local cache.
pub trait ArchiveClient {
    /// Resolve credentials. Called once, before the first download.
    fn authenticate(&mut self) -> Result<(), DataError>;

    /// Download one competition file into `dest_dir`, returning its final path.
    fn download_competition_file(
        &self,
        competition: &str,
        file_name: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, DataError>;
}
