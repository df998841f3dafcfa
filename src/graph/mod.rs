//! Tag graph: nodes, edges, co-occurrence weights, filtering, and metrics.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::errors::{Result, TagGraphError};

pub mod node;
pub mod edge;
pub mod builder;
pub mod collector;
pub mod filter;
pub mod metrics;

pub use node::TagNode;
pub use edge::TagEdge;
pub use builder::{build_tag_graph, TagGraphBuilder};
pub use collector::collect_unique_tags;
pub use filter::TopKFilter;
pub use metrics::GraphMetrics;

/// Name of the node attribute maintained by the builder.
pub const WEIGHT_ATTR: &str = "weight";

/// Weighted undirected tag co-occurrence graph.
///
/// Nodes are keyed by tag name. Edges are unordered: `edge(a, b)` and
/// `edge(b, a)` resolve to the same [`TagEdge`].
#[derive(Debug, Clone, Default)]
pub struct TagGraph {
    inner: UnGraph<TagNode, TagEdge>,
    index: HashMap<String, NodeIndex>,
}

impl TagGraph {
    pub(crate) fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            inner: UnGraph::with_capacity(nodes, edges),
            index: HashMap::with_capacity(nodes),
        }
    }

    /// Insert a node, or return the index of the node already carrying this name.
    pub(crate) fn add_node(&mut self, node: TagNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.name) {
            return idx;
        }
        let name = node.name.clone();
        let idx = self.inner.add_node(node);
        self.index.insert(name, idx);
        idx
    }

    pub(crate) fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, edge: TagEdge) {
        self.inner.add_edge(a, b, edge);
    }

    pub(crate) fn node_weight_mut(&mut self, idx: NodeIndex) -> Option<&mut TagNode> {
        self.inner.node_weight_mut(idx)
    }

    pub(crate) fn edge_between_mut(&mut self, a: NodeIndex, b: NodeIndex) -> Option<&mut TagEdge> {
        let eid = self.inner.find_edge(a, b)?;
        self.inner.edge_weight_mut(eid)
    }

    /// Access the underlying petgraph graph (for layouts and traversals).
    pub fn inner(&self) -> &UnGraph<TagNode, TagEdge> {
        &self.inner
    }

    /// Index of the node named `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Whether a node named `name` exists.
    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a node by tag name.
    pub fn node(&self, name: &str) -> Result<&TagNode> {
        self.index_of(name)
            .and_then(|idx| self.inner.node_weight(idx))
            .ok_or_else(|| TagGraphError::NodeNotFound(name.to_string()))
    }

    /// Look up the edge between two tags, in either order.
    pub fn edge(&self, a: &str, b: &str) -> Result<&TagEdge> {
        let ia = self.index_of(a).ok_or_else(|| TagGraphError::NodeNotFound(a.to_string()))?;
        let ib = self.index_of(b).ok_or_else(|| TagGraphError::NodeNotFound(b.to_string()))?;
        self.inner
            .find_edge(ia, ib)
            .and_then(|eid| self.inner.edge_weight(eid))
            .ok_or_else(|| TagGraphError::EdgeNotFound(a.to_string(), b.to_string()))
    }

    /// Names of all tags sharing an edge with `name`, sorted.
    pub fn neighbors(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| TagGraphError::NodeNotFound(name.to_string()))?;
        let mut out: Vec<&str> = self
            .inner
            .neighbors(idx)
            .map(|nb| self.inner[nb].name.as_str())
            .collect();
        out.sort_unstable();
        Ok(out)
    }

    /// Read a numeric node attribute.
    pub fn node_attribute(&self, name: &str, attr: &str) -> Result<f64> {
        self.node(name)?.attribute(attr).ok_or_else(|| {
            TagGraphError::InvalidArgument(format!("node '{name}' has no attribute '{attr}'"))
        })
    }

    /// Attach an external numeric attribute to a node.
    ///
    /// `weight` is owned by the builder and cannot be overwritten here.
    /// Values must be finite.
    pub fn set_node_attribute(&mut self, name: &str, attr: &str, value: f64) -> Result<()> {
        if attr == WEIGHT_ATTR {
            return Err(TagGraphError::InvalidArgument(format!(
                "'{WEIGHT_ATTR}' is computed from tag counts and cannot be assigned"
            )));
        }
        if !value.is_finite() {
            return Err(TagGraphError::InvalidArgument(format!(
                "attribute '{attr}' of node '{name}' must be finite, got {value}"
            )));
        }
        let idx = self
            .index_of(name)
            .ok_or_else(|| TagGraphError::NodeNotFound(name.to_string()))?;
        self.inner[idx].attributes.insert(attr.to_string(), value);
        Ok(())
    }

    /// Iterate over all nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &TagNode> {
        self.inner.node_weights()
    }

    /// Iterate over all edges as `(tag, tag, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &TagEdge)> {
        self.inner.edge_references().map(move |e| {
            (
                self.inner[e.source()].name.as_str(),
                self.inner[e.target()].name.as_str(),
                e.weight(),
            )
        })
    }
}

/// Graphs are equal when they hold the same tags and the same weighted edges,
/// independent of internal node indices.
impl PartialEq for TagGraph {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.edge_count() == other.edge_count()
            && self.nodes().all(|n| other.node(&n.name).is_ok_and(|o| o == n))
            && self
                .edges()
                .all(|(a, b, e)| other.edge(a, b).is_ok_and(|o| o == e))
    }
}
