//! Byte transport abstraction.
//!
//! The download orchestrator never talks to the network directly; it
//! consumes the [`Transport`] trait, which opens a chunked byte stream for
//! a URL and reports the total size when the server knows it. The default
//! implementation is [`HttpTransport`] on reqwest; tests inject
//! `testing::MockTransport` instead.

mod config;
mod http;
mod types;

pub use config::FetcherConfig;
pub use http::HttpTransport;
pub use types::{ByteStream, ChunkStream, Transport, TransportError};
