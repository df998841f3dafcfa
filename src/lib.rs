#![forbid(unsafe_code)]
#![deny(
    warnings,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms
)]

//! # metalgraph
//!
//! Core library for exploring heavy-metal album metadata:
//! - Tag list extraction from album snapshots
//! - Weighted tag co-occurrence graphs with top-K filtering
//! - Token counts for artist/album/tag clouds
//! - Last.fm request building for the collection step
//!
//! Every stage is a synchronous, in-memory transformation.

pub mod config;
pub mod dataset;
pub mod errors;
pub mod graph;
/// Last.fm request building.
pub mod lastfm;
/// High-level pipelines.
pub mod pipeline;
/// Persistence layer.
pub mod persistence;
pub mod types;

pub use config::TagGraphConfig;
pub use errors::{Result, TagGraphError};
pub use graph::{TagEdge, TagGraph, TagNode, TopKFilter};
pub use pipeline::{GraphBuildOutput, GraphBuildPipeline};
pub use types::{AlbumRecord, TagList, TagSet};
