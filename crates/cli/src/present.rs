//! Terminal rendering for listings, progress and summaries.
//!
//! All user-facing formatting lives here; the core emits structured values
//! only.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Instant;

use vodgrab_core::{DownloadProgress, MatchResult, Outcome, OutcomeStatus};

/// Formats a byte count with binary units, e.g. `1.50 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB", "TB", "PB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Formats a duration in seconds as `42s`, `3m 10s` or `2h 5m`.
pub fn format_eta(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    if seconds < 3600 {
        return format!("{}m {}s", seconds / 60, seconds % 60);
    }
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Prints the ordered match list with probed sizes and the total volume.
pub fn print_matches(matches: &[MatchResult<'_>], sizes: &[Option<u64>]) {
    println!("Found {} match(es):", matches.len());
    for (idx, result) in matches.iter().enumerate() {
        let entry = result.entry;
        let name = entry.display_name().unwrap_or(if entry.tvg_id.is_empty() {
            "<unnamed>"
        } else {
            entry.tvg_id.as_str()
        });
        let size = match sizes.get(idx).copied().flatten() {
            Some(bytes) => format_size(bytes),
            None => "unknown size".to_string(),
        };
        println!("  {}. {} ({})", idx + 1, name, size);
    }

    let total: u64 = sizes.iter().copied().flatten().sum();
    if total > 0 {
        println!("Total volume to be downloaded: {}", format_size(total));
    }
}

/// Renders in-place progress lines from structured updates.
///
/// Keeps per-task start times so rate and ETA can be derived locally.
pub struct ProgressRenderer {
    starts: HashMap<String, Instant>,
    rendered_any: bool,
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressRenderer {
    pub fn new() -> Self {
        Self {
            starts: HashMap::new(),
            rendered_any: false,
        }
    }

    pub fn render(&mut self, update: &DownloadProgress) {
        let start = *self
            .starts
            .entry(update.task_id.clone())
            .or_insert_with(Instant::now);

        let elapsed = start.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            update.downloaded_bytes as f64 / elapsed
        } else {
            0.0
        };

        let detail = match update.total_bytes {
            Some(total) if total > 0 => {
                let percent = update.downloaded_bytes as f64 / total as f64 * 100.0;
                let eta = if rate > 0.0 && total > update.downloaded_bytes {
                    format_eta(((total - update.downloaded_bytes) as f64 / rate) as u64)
                } else {
                    "--".to_string()
                };
                format!(
                    "{:5.1}% of {} ({}/s, ETA {})",
                    percent,
                    format_size(total),
                    format_size(rate as u64),
                    eta
                )
            }
            _ => format!(
                "{} ({}/s)",
                format_size(update.downloaded_bytes),
                format_size(rate as u64)
            ),
        };

        print!("\r{:<40} {}", truncate(&update.file_name, 40), detail);
        let _ = io::stdout().flush();
        self.rendered_any = true;
    }

    /// Terminates the in-place line once the run is over.
    pub fn finish(&self) {
        if self.rendered_any {
            println!();
        }
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let head: String = name.chars().take(max - 1).collect();
        format!("{head}…")
    }
}

/// Prints one line per outcome and the final tally.
pub fn print_summary(outcomes: &[Outcome]) {
    let mut committed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for outcome in outcomes {
        match &outcome.status {
            OutcomeStatus::Committed { bytes } => {
                committed += 1;
                println!("  committed  {} ({})", outcome.file_name, format_size(*bytes));
            }
            OutcomeStatus::Skipped => {
                skipped += 1;
                println!("  skipped    {} (already present)", outcome.file_name);
            }
            OutcomeStatus::Failed { reason } => {
                failed += 1;
                println!("  failed     {}: {}", outcome.file_name, reason);
            }
        }
    }

    println!(
        "{} committed, {} skipped, {} failed",
        committed, skipped, failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(42), "42s");
        assert_eq!(format_eta(190), "3m 10s");
        assert_eq!(format_eta(7500), "2h 5m");
    }

    #[test]
    fn test_truncate_keeps_short_names() {
        assert_eq!(truncate("short.mp4", 40), "short.mp4");
    }

    #[test]
    fn test_truncate_caps_long_names() {
        let long = "x".repeat(60);
        let truncated = truncate(&long, 40);
        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.ends_with('…'));
    }
}
