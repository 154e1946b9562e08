//! Types for the byte transport system.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// A pinned, boxed stream of body chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// An open byte stream for one resource.
pub struct ByteStream {
    /// Total size in bytes, when the server reports one.
    pub total_size: Option<u64>,
    /// The body chunks, in order.
    pub chunks: ChunkStream,
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream")
            .field("total_size", &self.total_size)
            .field("chunks", &"<stream>")
            .finish()
    }
}

/// Errors that can occur while fetching bytes.
///
/// Transport errors are never retried by the core; one failed transfer
/// surfaces as one failed task outcome.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP error status: {status}")]
    HttpStatus { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Stream error: {0}")]
    Stream(String),
}

/// A transport that can open byte streams for URLs.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &str;

    /// Opens a byte stream for the given URL.
    async fn open_stream(&self, url: &str) -> Result<ByteStream, TransportError>;

    /// Total size of the resource, if the server reports one.
    ///
    /// Used for listings only; `None` is not an error.
    async fn probe_size(&self, url: &str) -> Result<Option<u64>, TransportError>;
}
