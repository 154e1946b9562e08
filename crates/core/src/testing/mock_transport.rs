//! Mock transport for testing.

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{ByteStream, Transport, TransportError};

/// Chunk size used when splitting scripted bodies.
const CHUNK_SIZE: usize = 4;

/// Scripted behavior for one URL.
#[derive(Debug, Clone)]
enum Scripted {
    /// Serve the full body.
    Body(Bytes),
    /// Serve a prefix, then fail the stream mid-transfer. `advertised`
    /// is the total size reported at open time.
    Cut {
        prefix: Bytes,
        advertised: Option<u64>,
    },
    /// Fail at open time with this HTTP status.
    Status(u16),
}

/// Mock implementation of the [`Transport`] trait.
///
/// Responses are scripted per URL at construction time; requests are
/// recorded for assertions. URLs with no script answer with HTTP 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, Scripted>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockTransport {
    /// Create a new mock transport with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response serving `body`.
    pub fn with_body(mut self, url: &str, body: impl Into<Bytes>) -> Self {
        self.responses
            .insert(url.to_string(), Scripted::Body(body.into()));
        self
    }

    /// Script a stream that serves `prefix` and then fails, advertising
    /// `advertised` as the total size.
    pub fn with_cut(mut self, url: &str, prefix: impl Into<Bytes>, advertised: Option<u64>) -> Self {
        self.responses.insert(
            url.to_string(),
            Scripted::Cut {
                prefix: prefix.into(),
                advertised,
            },
        );
        self
    }

    /// Script an open-time failure with the given HTTP status.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), Scripted::Status(status));
        self
    }

    /// URLs passed to `open_stream`, in call order.
    pub async fn recorded_requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    fn chunked(body: &Bytes) -> Vec<Result<Bytes, TransportError>> {
        let mut chunks = Vec::new();
        let mut offset = 0;
        while offset < body.len() {
            let end = (offset + CHUNK_SIZE).min(body.len());
            chunks.push(Ok(body.slice(offset..end)));
            offset = end;
        }
        chunks
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn open_stream(&self, url: &str) -> Result<ByteStream, TransportError> {
        self.requests.write().await.push(url.to_string());

        match self.responses.get(url) {
            Some(Scripted::Body(body)) => Ok(ByteStream {
                total_size: Some(body.len() as u64),
                chunks: stream::iter(Self::chunked(body)).boxed(),
            }),
            Some(Scripted::Cut { prefix, advertised }) => {
                let mut chunks = Self::chunked(prefix);
                chunks.push(Err(TransportError::Stream(
                    "connection reset by peer".to_string(),
                )));
                Ok(ByteStream {
                    total_size: *advertised,
                    chunks: stream::iter(chunks).boxed(),
                })
            }
            Some(Scripted::Status(status)) => {
                Err(TransportError::HttpStatus { status: *status })
            }
            None => Err(TransportError::HttpStatus { status: 404 }),
        }
    }

    async fn probe_size(&self, url: &str) -> Result<Option<u64>, TransportError> {
        match self.responses.get(url) {
            Some(Scripted::Body(body)) => Ok(Some(body.len() as u64)),
            Some(Scripted::Cut { advertised, .. }) => Ok(*advertised),
            Some(Scripted::Status(status)) => {
                Err(TransportError::HttpStatus { status: *status })
            }
            None => Err(TransportError::HttpStatus { status: 404 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_body_served_in_chunks() {
        let transport = MockTransport::new().with_body("http://x/a", b"0123456789".as_slice());

        let mut stream = transport.open_stream("http://x/a").await.unwrap();
        assert_eq!(stream.total_size, Some(10));

        let mut collected = Vec::new();
        while let Some(chunk) = stream.chunks.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(collected, b"0123456789");
    }

    #[tokio::test]
    async fn test_cut_stream_fails_after_prefix() {
        let transport =
            MockTransport::new().with_cut("http://x/a", b"abcd".as_slice(), Some(100));

        let mut stream = transport.open_stream("http://x/a").await.unwrap();
        let first = stream.chunks.next().await.unwrap();
        assert_eq!(first.unwrap(), Bytes::from_static(b"abcd"));

        let second = stream.chunks.next().await.unwrap();
        assert!(matches!(second, Err(TransportError::Stream(_))));
    }

    #[tokio::test]
    async fn test_unscripted_url_is_not_found() {
        let transport = MockTransport::new();
        let result = transport.open_stream("http://x/missing").await;
        assert!(matches!(
            result,
            Err(TransportError::HttpStatus { status: 404 })
        ));
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let transport = MockTransport::new().with_body("http://x/a", b"x".as_slice());
        let _ = transport.open_stream("http://x/a").await;
        let _ = transport.open_stream("http://x/b").await;

        let recorded = transport.recorded_requests().await;
        assert_eq!(recorded, vec!["http://x/a", "http://x/b"]);
    }
}
