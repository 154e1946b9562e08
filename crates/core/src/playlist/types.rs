//! Types for parsed playlist records.

use serde::{Deserialize, Serialize};

/// One playlist record: an `#EXTINF` metadata line paired with its URL.
///
/// Entries are created once during a parse pass and never mutated. The URL
/// is always non-empty; metadata lines without a following URL are discarded
/// by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Value of the `tvg-id` attribute, empty when absent.
    pub tvg_id: String,
    /// Value of the `tvg-name` attribute, empty when absent.
    pub tvg_name: String,
    /// Display title: the text after the last comma of the metadata line.
    pub title: String,
    /// Stream or video URL.
    pub url: String,
}

impl Entry {
    /// Preferred human-readable name: the display title, falling back to
    /// the `tvg-name` attribute. `None` when both are empty.
    pub fn display_name(&self) -> Option<&str> {
        if !self.title.is_empty() {
            Some(&self.title)
        } else if !self.tvg_name.is_empty() {
            Some(&self.tvg_name)
        } else {
            None
        }
    }
}
