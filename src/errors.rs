//! Error types for metalgraph.

use thiserror::Error;

/// Top-level error type for tag graph operations.
#[derive(Debug, Error)]
pub enum TagGraphError {
    /// Configuration-related errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed input to a pipeline stage, or a tag missing from the tag set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A dataset row holds a tag field that is not a list of strings.
    #[error("failed to parse tag list in row {row}: {reason}")]
    Parse {
        /// Zero-based row index within the dataset.
        row: usize,
        /// What the parser rejected.
        reason: String,
    },

    /// Node lookup on a tag that is not in the graph.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Edge lookup on a pair of tags that are not connected.
    #[error("edge not found: {0} -- {1}")]
    EdgeNotFound(String, String),

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for tag graph operations.
pub type Result<T> = std::result::Result<T, TagGraphError>;
