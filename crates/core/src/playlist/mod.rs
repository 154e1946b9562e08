//! M3U playlist parsing.
//!
//! This module turns raw M3U text into an ordered sequence of [`Entry`]
//! records. Parsing is lenient: malformed entries are dropped, never fatal,
//! so a partially broken playlist still yields every well-formed record.
//!
//! # Example
//!
//! ```ignore
//! use vodgrab_core::playlist::parse;
//!
//! let text = r#"#EXTM3U
//! #EXTINF:-1 tvg-id="movie.1" tvg-name="Some Movie",Some Movie (2019)
//! http://example.com/vod/some-movie.mp4
//! "#;
//!
//! let entries = parse(text);
//! assert_eq!(entries[0].tvg_id, "movie.1");
//! ```

mod error;
mod parser;
mod types;

pub use error::PlaylistError;
pub use parser::{load_playlist, parse};
pub use types::Entry;
