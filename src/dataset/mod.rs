//! Dataset ingestion: album rows, tag list extraction, token counts.

/// JSONL dataset loader and dataset sources.
pub mod loader;
/// Text-encoded tag list parser.
pub mod tag_literal;
pub mod extractor;
pub mod frequencies;

pub use loader::{DatasetSource, JsonlDataset};
pub use tag_literal::parse_tag_literal;
pub use extractor::extract_tag_lists;
pub use frequencies::{tag_frequencies, top_records, weighted_tokens};
