//! Task planning: file name derivation and conflict resolution.

use chrono::Utc;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

use crate::matcher::MatchResult;

use super::types::DownloadTask;

/// Suffix marking a file whose transfer is still in flight.
pub const TEMP_SUFFIX: &str = ".part";

/// Characters not allowed in file names on common filesystems.
const ILLEGAL_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces path separators, reserved punctuation and control characters
/// with underscores and trims surrounding whitespace.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    cleaned.trim().to_string()
}

/// Extension of the URL's path component, dot included. Query string and
/// fragment are ignored.
fn url_extension(url: &str) -> Option<&str> {
    let path = match url.find(['?', '#']) {
        Some(idx) => &url[..idx],
        None => url,
    };
    let file = path.rsplit('/').next()?;
    match file.rfind('.') {
        Some(idx) if idx + 1 < file.len() => Some(&file[idx..]),
        _ => None,
    }
}

/// Splits a file name into stem and extension, dot included in the
/// extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Plans one task per match, resolving each to a unique final path under
/// `dest_dir`.
///
/// The name is derived from the entry's display title (falling back to
/// `tvg-name`, then to a positional placeholder), sanitized, and given the
/// URL's extension unless already present. Names claimed earlier in the
/// same pass get a numeric ` (n)` suffix before the extension; whether a
/// resolved name already exists on disk is the runner's concern (a complete
/// file there makes the task a skip, a stale partial is replaced by the
/// atomic rename).
pub fn plan(matches: &[MatchResult<'_>], dest_dir: &Path) -> Vec<DownloadTask> {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut tasks = Vec::with_capacity(matches.len());

    for (idx, result) in matches.iter().enumerate() {
        let entry = result.entry;

        let base = entry
            .display_name()
            .map(sanitize_file_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("entry-{}", idx + 1));

        let derived = match url_extension(&entry.url) {
            Some(ext) if !base.to_lowercase().ends_with(&ext.to_lowercase()) => {
                format!("{base}{ext}")
            }
            _ => base,
        };

        let file_name = resolve_name(&derived, &mut claimed);
        let final_path = dest_dir.join(&file_name);
        let temp_path = dest_dir.join(format!("{file_name}{TEMP_SUFFIX}"));

        tasks.push(DownloadTask {
            id: Uuid::new_v4().to_string(),
            source_url: entry.url.clone(),
            file_name,
            final_path,
            temp_path,
            created_at: Utc::now(),
        });
    }

    tasks
}

/// Walks `name`, `name (1)`, `name (2)`, ... until a candidate not claimed
/// in this planning pass is found, then claims it.
fn resolve_name(derived: &str, claimed: &mut HashSet<String>) -> String {
    let (stem, ext) = split_name(derived);
    let mut n = 0usize;
    loop {
        let candidate = if n == 0 {
            derived.to_string()
        } else {
            format!("{stem} ({n}){ext}")
        };
        if !claimed.contains(&candidate) {
            claimed.insert(candidate.clone());
            return candidate;
        }
        n += 1;
    }
}
