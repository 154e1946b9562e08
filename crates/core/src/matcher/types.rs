//! Types for the matching system.

use serde::Serialize;

use crate::playlist::Entry;

/// An entry judged relevant to a search term.
///
/// Borrows the source entry from the parse result; ordering follows the
/// entry's first appearance in the playlist.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchResult<'a> {
    /// The matched playlist entry.
    pub entry: &'a Entry,
}

impl<'a> MatchResult<'a> {
    pub fn new(entry: &'a Entry) -> Self {
        Self { entry }
    }
}
