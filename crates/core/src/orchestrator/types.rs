//! Types for the download orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A planned write operation: one matched entry resolved to a unique
/// destination under the configured directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadTask {
    /// Unique task id.
    pub id: String,
    /// URL the bytes come from.
    pub source_url: String,
    /// Resolved file name, unique within one planning pass.
    pub file_name: String,
    /// Final destination path.
    pub final_path: PathBuf,
    /// In-progress path; renamed onto `final_path` on success, removed on
    /// failure.
    pub temp_path: PathBuf,
    /// When the task was planned.
    pub created_at: DateTime<Utc>,
}

/// Terminal result of executing one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub task_id: String,
    /// Resolved final file name, for rendering.
    pub file_name: String,
    pub status: OutcomeStatus,
}

/// How a task ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Bytes transferred and the file committed to its final path.
    Committed { bytes: u64 },
    /// A complete file already sat at the final path; nothing transferred.
    Skipped,
    /// Transfer or commit failed; no partial file remains.
    Failed { reason: String },
}

impl OutcomeStatus {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Progress update emitted while a task is transferring.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadProgress {
    pub task_id: String,
    pub file_name: String,
    pub downloaded_bytes: u64,
    /// Total bytes, when the transport reported a size.
    pub total_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_status_predicates() {
        assert!(OutcomeStatus::Committed { bytes: 1 }.is_committed());
        assert!(!OutcomeStatus::Skipped.is_committed());
        assert!(OutcomeStatus::Failed {
            reason: "x".to_string()
        }
        .is_failed());
    }

    #[test]
    fn test_outcome_status_serialization() {
        let json = serde_json::to_string(&OutcomeStatus::Committed { bytes: 42 }).unwrap();
        assert_eq!(json, r#"{"committed":{"bytes":42}}"#);
        let json = serde_json::to_string(&OutcomeStatus::Skipped).unwrap();
        assert_eq!(json, r#""skipped""#);
    }
}
