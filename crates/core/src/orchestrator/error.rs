//! Error types for download execution.

use std::path::PathBuf;
use thiserror::Error;

use crate::fetcher::TransportError;

/// Errors that can occur while executing one download task.
///
/// These never cross the orchestrator boundary as errors; the runner folds
/// them into a `Failed` outcome so sibling tasks keep running.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The transport failed to open or continue the byte stream.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Temp-file creation, write, or rename failure.
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run was cancelled while this task was transferring.
    #[error("Download cancelled")]
    Cancelled,
}

impl DownloadError {
    pub(crate) fn filesystem(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}
