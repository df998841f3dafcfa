//! Persistence layer for tag graphs.
//! Saves/loads a graph as pretty JSON together with build metadata, which is
//! the hand-off format for external renderers.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::TagGraphConfig;
use crate::graph::{TagEdge, TagGraph, TagNode};

/// Metadata stored with the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Version of the metalgraph library.
    pub version: String,
    /// ISO 8601 timestamp of creation.
    pub created_at: String,
    /// Configuration used to build and filter the graph.
    pub config: TagGraphConfig,
}

impl ExportMetadata {
    /// Create new metadata with current version and timestamp.
    pub fn new(config: &TagGraphConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            config: config.clone(),
        }
    }
}

/// One edge of an exported graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// First endpoint.
    pub source: String,
    /// Second endpoint.
    pub target: String,
    /// Co-occurrence count.
    pub weight: u64,
}

/// Serialized form of a [`TagGraph`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    /// Build metadata.
    pub metadata: ExportMetadata,
    /// Nodes in graph index order.
    pub nodes: Vec<TagNode>,
    /// Edges in graph index order.
    pub edges: Vec<EdgeRecord>,
}

impl GraphExport {
    /// Snapshot a graph.
    pub fn from_graph(graph: &TagGraph, metadata: ExportMetadata) -> Self {
        Self {
            metadata,
            nodes: graph.nodes().cloned().collect(),
            edges: graph
                .edges()
                .map(|(source, target, e)| EdgeRecord {
                    source: source.to_string(),
                    target: target.to_string(),
                    weight: e.weight,
                })
                .collect(),
        }
    }

    /// Rebuild the graph. Edges must reference exported nodes.
    pub fn into_graph(self) -> Result<TagGraph> {
        let mut graph = TagGraph::with_capacity(self.nodes.len(), self.edges.len());
        for node in self.nodes {
            graph.add_node(node);
        }
        for edge in self.edges {
            let a = graph
                .index_of(&edge.source)
                .with_context(|| format!("edge references unknown tag '{}'", edge.source))?;
            let b = graph
                .index_of(&edge.target)
                .with_context(|| format!("edge references unknown tag '{}'", edge.target))?;
            graph.add_edge(a, b, TagEdge { weight: edge.weight });
        }
        Ok(graph)
    }
}

/// Save the graph to `path` as pretty JSON.
pub fn save_graph(path: &Path, graph: &TagGraph, config: &TagGraphConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let export = GraphExport::from_graph(graph, ExportMetadata::new(config));
    let file = File::create(path).context("Failed to create graph file")?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)?;
    Ok(())
}

/// Load a graph saved with [`save_graph`].
pub fn load_graph(path: &Path) -> Result<(ExportMetadata, TagGraph)> {
    let file = File::open(path).context("Failed to open graph file")?;
    let export: GraphExport = serde_json::from_reader(BufReader::new(file))
        .context("Failed to parse graph file")?;
    let metadata = export.metadata.clone();
    Ok((metadata, export.into_graph()?))
}
