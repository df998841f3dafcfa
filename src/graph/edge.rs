//! Tag edge definition (co-occurrence count).

use serde::{Deserialize, Serialize};

/// Undirected edge between two tags that share at least one album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEdge {
    /// Number of co-occurrences seen so far.
    pub weight: u64,
}

impl TagEdge {
    /// Edge for a first co-occurrence.
    pub fn new() -> Self {
        Self { weight: 1 }
    }
}

impl Default for TagEdge {
    fn default() -> Self {
        Self::new()
    }
}
