//! Search-term matching over parsed entries.

use crate::playlist::Entry;

use super::types::MatchResult;

/// File extensions accepted as static video files.
///
/// Anything else (notably `.m3u8` HLS manifests and extension-less stream
/// URLs) is treated as a live stream and excluded from matching.
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".avi", ".mov", ".ts", ".m4v"];

/// Whether a URL points at a recognized static video file.
///
/// The check is case-insensitive and ignores any query string or fragment.
pub fn has_video_extension(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    let path = match lowered.find(['?', '#']) {
        Some(idx) => &lowered[..idx],
        None => lowered.as_str(),
    };
    VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Filters entries down to downloadable matches for `term`.
///
/// An entry is included iff its URL passes the extension gate and `term` is
/// a case-insensitive substring of its `tvg_id` or `tvg_name`. The empty
/// term matches every gated entry. Each entry appears at most once even when
/// both fields match, and input order is preserved.
pub fn find_matches<'a>(entries: &'a [Entry], term: &str) -> Vec<MatchResult<'a>> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| has_video_extension(&entry.url))
        .filter(|entry| {
            needle.is_empty()
                || entry.tvg_id.to_lowercase().contains(&needle)
                || entry.tvg_name.to_lowercase().contains(&needle)
        })
        .map(MatchResult::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tvg_id: &str, tvg_name: &str, url: &str) -> Entry {
        Entry {
            tvg_id: tvg_id.to_string(),
            tvg_name: tvg_name.to_string(),
            title: String::new(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_video_extension_gate() {
        assert!(has_video_extension("http://x/movie.mp4"));
        assert!(has_video_extension("http://x/movie.MKV"));
        assert!(has_video_extension("http://x/movie.mp4?token=abc"));
        assert!(!has_video_extension("http://x/live.m3u8"));
        assert!(!has_video_extension("http://x/stream"));
        assert!(!has_video_extension("http://x/archive.zip"));
    }

    #[test]
    fn test_live_entries_excluded_even_on_exact_match() {
        let entries = vec![entry("", "News", "http://x/live.m3u8")];
        assert!(find_matches(&entries, "news").is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive_on_both_fields() {
        let entries = vec![
            entry("", "Alpha", "http://x/a.mp4"),
            entry("ALPHA-2", "", "http://x/b.mp4"),
            entry("beta", "Beta", "http://x/c.mp4"),
        ];
        let matches = find_matches(&entries, "alpha");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].entry.tvg_name, "Alpha");
        assert_eq!(matches[1].entry.tvg_id, "ALPHA-2");
    }

    #[test]
    fn test_entry_matching_on_both_fields_appears_once() {
        let entries = vec![entry("show.alpha", "Alpha Show", "http://x/a.mp4")];
        assert_eq!(find_matches(&entries, "alpha").len(), 1);
    }

    #[test]
    fn test_empty_term_matches_all_gated_entries() {
        let entries = vec![
            entry("a", "", "http://x/a.mp4"),
            entry("b", "", "http://x/live.m3u8"),
            entry("c", "", "http://x/c.avi"),
        ];
        let matches = find_matches(&entries, "");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].entry.tvg_id, "a");
        assert_eq!(matches[1].entry.tvg_id, "c");
    }

    #[test]
    fn test_order_preserved() {
        let entries = vec![
            entry("zz.match", "", "http://x/z.mp4"),
            entry("aa.match", "", "http://x/a.mp4"),
        ];
        let matches = find_matches(&entries, "match");
        assert_eq!(matches[0].entry.tvg_id, "zz.match");
        assert_eq!(matches[1].entry.tvg_id, "aa.match");
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let entries = vec![entry("a", "A", "http://x/a.mp4")];
        assert!(find_matches(&entries, "zzz").is_empty());
    }
}
