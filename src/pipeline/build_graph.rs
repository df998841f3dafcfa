//! Orchestrates: dataset -> tag lists -> tag set -> TagGraph -> top-K subgraph.

use tracing::info;

use crate::{
    config::TagGraphConfig,
    dataset::{extract_tag_lists, DatasetSource},
    errors::Result,
    graph::{build_tag_graph, collect_unique_tags, GraphMetrics, TagGraph, TopKFilter},
    types::{AlbumRecord, TagList, TagSet},
};

/// Everything the pipeline produced, stage by stage.
#[derive(Debug)]
pub struct GraphBuildOutput {
    /// Parsed per-album tag lists.
    pub tag_lists: Vec<TagList>,
    /// Distinct tags across all albums.
    pub tags: TagSet,
    /// Full co-occurrence graph.
    pub graph: TagGraph,
    /// Top-K subgraph of `graph`.
    pub filtered: TagGraph,
}

/// High-level pipeline: album rows -> tag graph -> filtered tag graph.
#[derive(Debug)]
pub struct GraphBuildPipeline {
    config: TagGraphConfig,
}

impl GraphBuildPipeline {
    /// Create a new pipeline with the given config.
    pub fn new(config: TagGraphConfig) -> Self {
        Self { config }
    }

    /// Config the pipeline runs with.
    pub fn config(&self) -> &TagGraphConfig {
        &self.config
    }

    /// Load the dataset and run every stage.
    pub fn run(&self, source: DatasetSource) -> Result<GraphBuildOutput> {
        let records = source.load()?;
        self.run_records(&records)
    }

    /// Run every stage over rows already in memory.
    pub fn run_records(&self, records: &[AlbumRecord]) -> Result<GraphBuildOutput> {
        self.config.validate()?;

        let tag_lists = extract_tag_lists(records)?;
        info!(
            "Extracted {} tag lists from {} rows",
            tag_lists.len(),
            records.len()
        );

        let tags = collect_unique_tags(&tag_lists)?;
        info!("Collected {} unique tags", tags.len());

        let graph = build_tag_graph(&tag_lists, &tags)?;
        let metrics = GraphMetrics::compute(&graph);
        info!(
            "Graph built: {} nodes, {} edges (avg degree {:.2})",
            metrics.num_nodes, metrics.num_edges, metrics.avg_degree
        );

        let filtered = self.filter(&graph)?;
        info!(
            "Kept top {} by '{}': {} nodes, {} edges",
            self.config.top_k,
            self.config.rank_attribute,
            filtered.node_count(),
            filtered.edge_count()
        );

        Ok(GraphBuildOutput {
            tag_lists,
            tags,
            graph,
            filtered,
        })
    }

    /// Apply the configured top-K filter to a graph built earlier.
    pub fn filter(&self, graph: &TagGraph) -> Result<TagGraph> {
        TopKFilter::new(self.config.top_k, self.config.rank_attribute.clone()).apply(graph)
    }
}
