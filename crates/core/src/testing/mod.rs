//! Testing utilities and mock implementations.
//!
//! Provides a scripted [`MockTransport`] so parser-to-orchestrator flows
//! can be exercised end to end without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use vodgrab_core::testing::MockTransport;
//!
//! let transport = MockTransport::new()
//!     .with_body("http://x/good.mp4", b"full body".as_slice())
//!     .with_cut("http://x/bad.mp4", b"partial".as_slice(), Some(1000))
//!     .with_status("http://x/gone.mp4", 404);
//!
//! // Inject into a DownloadRunner, then assert on recorded_requests().
//! ```

mod mock_transport;

pub use mock_transport::MockTransport;
