//! Common core types used across metalgraph.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Tags attached to one album, in source order. Repeats are kept.
pub type TagList = Vec<String>;

/// All distinct tag names seen across a dataset.
pub type TagSet = HashSet<String>;

/// One row of the album snapshot.
///
/// `tags` holds the text-encoded list literal exactly as the snapshot stores
/// it, e.g. `"['power metal', 'progressive metal']"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRecord {
    /// Artist name.
    pub artist: String,
    /// Album title.
    pub album: String,
    /// Distinct listeners reported by the metadata service.
    #[serde(default)]
    pub listeners: Option<u64>,
    /// Total play count reported by the metadata service.
    #[serde(default)]
    pub playcount: Option<u64>,
    /// Aggregated review score.
    #[serde(default)]
    pub score: Option<f64>,
    /// Encoded tag list, absent when the album has no tag data.
    #[serde(default)]
    pub tags: Option<String>,
}

/// Numeric column used to rank albums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Distinct listeners.
    Listeners,
    /// Total plays.
    Playcount,
    /// Review score.
    Score,
}

impl AlbumRecord {
    /// Value of `metric` for this row, if present.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Listeners => self.listeners.map(|v| v as f64),
            Metric::Playcount => self.playcount.map(|v| v as f64),
            Metric::Score => self.score,
        }
    }
}

/// Text column used as a cloud token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Artist name.
    Artist,
    /// Album title.
    Album,
}

impl Field {
    /// Borrow the column from a row.
    pub fn get(self, record: &AlbumRecord) -> &str {
        match self {
            Field::Artist => &record.artist,
            Field::Album => &record.album,
        }
    }
}
