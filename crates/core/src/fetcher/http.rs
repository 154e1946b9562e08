//! HTTP transport implementation on reqwest.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::config::FetcherConfig;
use super::types::{ByteStream, Transport, TransportError};

/// Streaming HTTP transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new transport with the given configuration.
    pub fn new(config: FetcherConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    fn map_request_error(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::ConnectionFailed(e.to_string())
        } else {
            TransportError::Stream(e.to_string())
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(FetcherConfig::default())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn open_stream(&self, url: &str) -> Result<ByteStream, TransportError> {
        debug!(url = url, "Opening stream");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let total_size = response.content_length();
        let chunks = response
            .bytes_stream()
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Stream(e.to_string())
                }
            })
            .boxed();

        Ok(ByteStream { total_size, chunks })
    }

    async fn probe_size(&self, url: &str) -> Result<Option<u64>, TransportError> {
        // HEAD is cheaper; fall back to GET when the server does not
        // answer it with a length.
        if let Ok(response) = self.client.head(url).send().await {
            if response.status().is_success() {
                if let Some(len) = response.content_length() {
                    if len > 0 {
                        return Ok(Some(len));
                    }
                }
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(response.content_length())
    }
}
