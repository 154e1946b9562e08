//! Error types for playlist parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a playlist.
///
/// Malformed individual entries are not errors; the parser drops them and
/// keeps going. Only an unreadable input source is fatal.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// The playlist source cannot be read.
    #[error("Playlist not available: {path}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
