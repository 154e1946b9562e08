//! Line-oriented M3U parser.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::path::Path;

use super::error::PlaylistError;
use super::types::Entry;

/// Per-entry metadata tag.
const EXTINF_TAG: &str = "#EXTINF:";
/// Playlist header, ignored unconditionally.
const HEADER_TAG: &str = "#EXTM3U";

static TVG_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"tvg-id="([^"]*)""#).unwrap());
static TVG_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"tvg-name="([^"]*)""#).unwrap());

/// Metadata accumulated from an `#EXTINF` line while waiting for its URL.
#[derive(Debug)]
struct PendingMeta {
    tvg_id: String,
    tvg_name: String,
    title: String,
}

/// Parser state: either between entries, or holding metadata that still
/// needs its URL line.
#[derive(Debug)]
enum ParserState {
    Idle,
    AwaitingUrl(PendingMeta),
}

/// Parses M3U text into an ordered list of entries.
///
/// A new `#EXTINF` line overwrites any pending metadata; pending metadata
/// with no URL before the next tag or end of input yields no entry. Lines
/// that are blank, comments, or URLs without pending metadata are ignored.
pub fn parse(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut state = ParserState::Idle;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(HEADER_TAG) {
            continue;
        }

        if line.starts_with(EXTINF_TAG) {
            state = ParserState::AwaitingUrl(parse_extinf(line));
        } else if line.starts_with('#') {
            // Unrecognized directive; does not clear pending metadata.
            continue;
        } else if let ParserState::AwaitingUrl(meta) =
            std::mem::replace(&mut state, ParserState::Idle)
        {
            entries.push(Entry {
                tvg_id: meta.tvg_id,
                tvg_name: meta.tvg_name,
                title: meta.title,
                url: line.to_string(),
            });
        }
    }

    entries
}

/// Extracts the tvg attributes and the trailing display title from an
/// `#EXTINF` line. Absent attributes default to the empty string.
fn parse_extinf(line: &str) -> PendingMeta {
    let tvg_id = TVG_ID_RE
        .captures(line)
        .map(|c| c[1].to_string())
        .unwrap_or_default();
    let tvg_name = TVG_NAME_RE
        .captures(line)
        .map(|c| c[1].to_string())
        .unwrap_or_default();
    let title = line
        .rsplit_once(',')
        .map(|(_, title)| title.trim().to_string())
        .unwrap_or_default();

    PendingMeta {
        tvg_id,
        tvg_name,
        title,
    }
}

/// Reads and parses the playlist at `path`.
///
/// A missing or unreadable file is the only fatal condition; everything
/// else degrades to a shorter entry list.
pub async fn load_playlist(path: &Path) -> Result<Vec<Entry>, PlaylistError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PlaylistError::InputUnavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_entry() {
        let text = r#"#EXTM3U
#EXTINF:-1 tvg-id="movie.1" tvg-name="Some Movie",Some Movie (2019)
http://example.com/vod/some-movie.mp4
"#;
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tvg_id, "movie.1");
        assert_eq!(entries[0].tvg_name, "Some Movie");
        assert_eq!(entries[0].title, "Some Movie (2019)");
        assert_eq!(entries[0].url, "http://example.com/vod/some-movie.mp4");
    }

    #[test]
    fn test_parse_attributes_in_any_order() {
        let text = "#EXTINF:-1 tvg-name=\"Name First\" tvg-id=\"id.after\",Title\nhttp://x/a.mkv\n";
        let entries = parse(text);
        assert_eq!(entries[0].tvg_id, "id.after");
        assert_eq!(entries[0].tvg_name, "Name First");
    }

    #[test]
    fn test_parse_absent_attributes_default_to_empty() {
        let text = "#EXTINF:-1,Bare Title\nhttp://x/a.mp4\n";
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tvg_id, "");
        assert_eq!(entries[0].tvg_name, "");
        assert_eq!(entries[0].title, "Bare Title");
    }

    #[test]
    fn test_parse_metadata_without_url_is_discarded() {
        let text = "#EXTINF:-1 tvg-id=\"a\",A\n#EXTINF:-1 tvg-id=\"b\",B\nhttp://x/b.mp4\n";
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tvg_id, "b");
    }

    #[test]
    fn test_parse_trailing_metadata_at_eof_is_discarded() {
        let text = "#EXTINF:-1 tvg-id=\"a\",A";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn test_parse_url_without_metadata_is_ignored() {
        let text = "http://x/orphan.mp4\n#EXTINF:-1,Real\nhttp://x/real.mp4\n";
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "http://x/real.mp4");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_other_directives() {
        let text = r#"#EXTM3U

#EXTINF:0,3sat SD
#EXTVLCOPT:network-caching=1000
http://x/3sat.ts

#EXTINF:0,KiKA SD
http://x/kika.ts
"#;
        let entries = parse(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "3sat SD");
        assert_eq!(entries[1].title, "KiKA SD");
    }

    #[test]
    fn test_parse_title_uses_last_comma() {
        let text = "#EXTINF:-1 tvg-name=\"A, B\",The Title\nhttp://x/a.mp4\n";
        let entries = parse(text);
        assert_eq!(entries[0].title, "The Title");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
    }

    #[tokio::test]
    async fn test_load_playlist_missing_file() {
        let result = load_playlist(Path::new("/nonexistent/playlist.m3u")).await;
        assert!(matches!(
            result,
            Err(PlaylistError::InputUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_playlist_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#EXTM3U").unwrap();
        writeln!(file, "#EXTINF:-1 tvg-id=\"x\",X").unwrap();
        writeln!(file, "http://example.com/x.mp4").unwrap();

        let entries = load_playlist(file.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tvg_id, "x");
    }
}
