//! Sequential task execution with atomic commit semantics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::StreamExt;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::fetcher::Transport;

use super::error::DownloadError;
use super::types::{DownloadProgress, DownloadTask, Outcome, OutcomeStatus};

/// Minimum interval between progress updates for one task.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Executes planned download tasks against an injected transport.
///
/// Each task moves through `Planned -> Transferring -> Committed` on
/// success or `Planned -> Transferring -> Aborted` on failure. The aborted
/// path removes the temp file, so neither outcome ever leaves a partial
/// file at the final path.
pub struct DownloadRunner {
    transport: Arc<dyn Transport>,
    cancelled: Arc<AtomicBool>,
}

impl DownloadRunner {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag for callers that want to cancel the run, e.g. from a
    /// Ctrl-C handler. Once set, the in-flight task aborts and no further
    /// task starts; committed files are untouched.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Executes tasks one at a time, in order.
    ///
    /// Per-task failures are isolated: a failed transfer becomes that
    /// task's outcome and the next task still runs. Outcomes for tasks
    /// never started due to cancellation are not reported.
    pub async fn execute_all(
        &self,
        tasks: &[DownloadTask],
        progress_tx: Option<mpsc::Sender<DownloadProgress>>,
    ) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            if self.is_cancelled() {
                info!(
                    unstarted = tasks.len() - outcomes.len(),
                    "Cancellation requested, stopping before next task"
                );
                break;
            }
            outcomes.push(self.execute(task, progress_tx.as_ref()).await);
        }
        outcomes
    }

    /// Runs one task through the safe-write state machine.
    pub async fn execute(
        &self,
        task: &DownloadTask,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Outcome {
        // A complete file at the final path means a prior run already
        // committed this download; a pending temp marker means it did not.
        if task.final_path.exists() && !task.temp_path.exists() {
            debug!(file = %task.file_name, "Already present, skipping");
            return self.outcome(task, OutcomeStatus::Skipped);
        }

        match self.transfer(task, progress_tx).await {
            Ok(bytes) => {
                info!(file = %task.file_name, bytes, "Committed");
                self.outcome(task, OutcomeStatus::Committed { bytes })
            }
            Err(e) => {
                self.abort(task).await;
                warn!(file = %task.file_name, error = %e, "Download failed");
                self.outcome(
                    task,
                    OutcomeStatus::Failed {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    fn outcome(&self, task: &DownloadTask, status: OutcomeStatus) -> Outcome {
        Outcome {
            task_id: task.id.clone(),
            file_name: task.file_name.clone(),
            status,
        }
    }

    /// Transferring state: temp file open, stream copy, atomic rename.
    async fn transfer(
        &self,
        task: &DownloadTask,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<u64, DownloadError> {
        if let Some(parent) = task.final_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::filesystem(parent, e))?;
        }

        let mut file = File::create(&task.temp_path)
            .await
            .map_err(|e| DownloadError::filesystem(&task.temp_path, e))?;

        let mut stream = self.transport.open_stream(&task.source_url).await?;
        let total_bytes = stream.total_size;

        let mut downloaded = 0u64;
        let mut last_update = Instant::now();

        while let Some(chunk) = stream.chunks.next().await {
            if self.is_cancelled() {
                return Err(DownloadError::Cancelled);
            }

            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::filesystem(&task.temp_path, e))?;
            downloaded += chunk.len() as u64;

            if let Some(tx) = progress_tx {
                let now = Instant::now();
                if now.duration_since(last_update) >= PROGRESS_INTERVAL {
                    let _ = tx.try_send(DownloadProgress {
                        task_id: task.id.clone(),
                        file_name: task.file_name.clone(),
                        downloaded_bytes: downloaded,
                        total_bytes,
                    });
                    last_update = now;
                }
            }
        }

        file.flush()
            .await
            .map_err(|e| DownloadError::filesystem(&task.temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| DownloadError::filesystem(&task.temp_path, e))?;
        drop(file);

        fs::rename(&task.temp_path, &task.final_path)
            .await
            .map_err(|e| DownloadError::filesystem(&task.final_path, e))?;

        if let Some(tx) = progress_tx {
            let _ = tx.try_send(DownloadProgress {
                task_id: task.id.clone(),
                file_name: task.file_name.clone(),
                downloaded_bytes: downloaded,
                total_bytes,
            });
        }

        Ok(downloaded)
    }

    /// Aborted state: best-effort temp removal. Removal failure is logged,
    /// never escalated past the task's own outcome.
    async fn abort(&self, task: &DownloadTask) {
        if task.temp_path.exists() {
            if let Err(e) = fs::remove_file(&task.temp_path).await {
                warn!(
                    "Failed to remove temp file {}: {}",
                    task.temp_path.display(),
                    e
                );
            }
        }
    }
}
