//! Graph construction logic: from per-album tag lists into a TagGraph.

use itertools::Itertools;
use tracing::debug;

use crate::{
    errors::{Result, TagGraphError},
    graph::{TagEdge, TagGraph, TagNode},
    types::{TagList, TagSet},
};

/// Builder for a TagGraph over a fixed tag set.
///
/// The node set is fixed up front; tag lists only ever bump weights or add
/// edges between existing nodes.
#[derive(Debug)]
pub struct TagGraphBuilder {
    graph: TagGraph,
    albums: usize,
}

impl TagGraphBuilder {
    /// Create one node per tag, each with weight 1.
    ///
    /// Nodes are inserted in ascending name order so node indices do not
    /// depend on hash-set iteration order.
    pub fn new(tags: &TagSet) -> Self {
        let mut names: Vec<&String> = tags.iter().collect();
        names.sort_unstable();

        let mut graph = TagGraph::with_capacity(names.len(), 0);
        for name in names {
            graph.add_node(TagNode::new(name.clone()));
        }

        Self { graph, albums: 0 }
    }

    /// Ingest the tags of one album.
    ///
    /// Every element bumps its node weight, repeats included. Every pair of
    /// positions bumps (or creates) the edge between the two tags; a pair of
    /// identical tags never forms a self loop. A tag outside the tag set
    /// fails the call before anything is modified.
    pub fn add_tag_list(&mut self, tags: &[String]) -> Result<()> {
        let indices = tags
            .iter()
            .map(|tag| {
                self.graph.index_of(tag).ok_or_else(|| {
                    TagGraphError::InvalidArgument(format!("tag '{tag}' is not in the tag set"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for &idx in &indices {
            if let Some(node) = self.graph.node_weight_mut(idx) {
                node.weight += 1;
            }
        }

        for (a, b) in indices.iter().copied().tuple_combinations() {
            if a == b {
                continue;
            }
            match self.graph.edge_between_mut(a, b) {
                Some(edge) => edge.weight += 1,
                None => self.graph.add_edge(a, b, TagEdge::new()),
            }
        }

        self.albums += 1;
        Ok(())
    }

    /// Number of tag lists ingested so far.
    pub fn albums(&self) -> usize {
        self.albums
    }

    /// Finalize the graph construction.
    pub fn finalize(self) -> TagGraph {
        debug!(
            albums = self.albums,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "tag graph built"
        );
        self.graph
    }
}

/// Build the co-occurrence graph for `tag_lists` over `tags`.
///
/// `tags` must contain every tag appearing in `tag_lists`.
pub fn build_tag_graph(tag_lists: &[TagList], tags: &TagSet) -> Result<TagGraph> {
    let mut builder = TagGraphBuilder::new(tags);
    for list in tag_lists {
        builder.add_tag_list(list)?;
    }
    Ok(builder.finalize())
}
