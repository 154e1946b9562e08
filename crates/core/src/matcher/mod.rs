//! Entry matching and live-stream filtering.
//!
//! Filters a parsed entry list down to downloadable candidates: entries
//! whose URL carries a recognized static-video extension (the gate that
//! keeps unbounded live streams out) and whose `tvg-id` or `tvg-name`
//! contains the search term, case-insensitively. Input order is preserved;
//! results are never re-sorted by relevance.

mod filter;
mod types;

pub use filter::{find_matches, has_video_extension, VIDEO_EXTENSIONS};
pub use types::MatchResult;
