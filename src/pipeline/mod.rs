//! High-level pipeline: tag graph building and filtering.

pub mod build_graph;

pub use build_graph::{GraphBuildOutput, GraphBuildPipeline};
