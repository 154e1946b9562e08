//! Download orchestration: task planning and safe execution.
//!
//! This module turns matched entries into [`DownloadTask`]s with unique,
//! sanitized file names, then executes them with non-corrupting write
//! semantics: every transfer goes to a `.part` temp file that is atomically
//! renamed onto the final path on success and removed on failure, so the
//! final path is never left partially written.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vodgrab_core::orchestrator::{plan, DownloadRunner};
//!
//! let tasks = plan(&matches, Path::new("downloads"));
//! let runner = DownloadRunner::new(Arc::new(transport));
//! let outcomes = runner.execute_all(&tasks, None).await;
//! for outcome in &outcomes {
//!     println!("{}: {:?}", outcome.file_name, outcome.status);
//! }
//! ```

mod error;
mod planner;
mod runner;
mod types;

pub use error::DownloadError;
pub use planner::{plan, sanitize_file_name, TEMP_SUFFIX};
pub use runner::DownloadRunner;
pub use types::{DownloadProgress, DownloadTask, Outcome, OutcomeStatus};
