//! Graph-level summary metrics (counts, degree, heaviest entries).

use crate::graph::TagGraph;

/// Summary metrics for health-checking the graph.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GraphMetrics {
    /// Total number of nodes.
    pub num_nodes: usize,
    /// Total number of edges.
    pub num_edges: usize,
    /// Average degree of the graph.
    pub avg_degree: f32,
    /// Edge count over the number of possible pairs.
    pub density: f32,
    /// Tag with the largest node weight (ties: smaller name).
    pub heaviest_node: Option<(String, u64)>,
    /// Tag pair with the largest edge weight (ties: smaller pair).
    pub heaviest_edge: Option<(String, String, u64)>,
}

impl GraphMetrics {
    /// Compute metrics for the given graph.
    pub fn compute(graph: &TagGraph) -> Self {
        let num_nodes = graph.node_count();
        let num_edges = graph.edge_count();

        let avg_degree = if num_nodes > 0 {
            (2 * num_edges) as f32 / num_nodes as f32
        } else {
            0.0
        };
        let density = if num_nodes > 1 {
            (2 * num_edges) as f32 / (num_nodes * (num_nodes - 1)) as f32
        } else {
            0.0
        };

        let heaviest_node = graph
            .nodes()
            .max_by(|a, b| a.weight.cmp(&b.weight).then_with(|| b.name.cmp(&a.name)))
            .map(|n| (n.name.clone(), n.weight));

        let heaviest_edge = graph
            .edges()
            .map(|(u, v, e)| if u <= v { (u, v, e.weight) } else { (v, u, e.weight) })
            .max_by(|a, b| a.2.cmp(&b.2).then_with(|| (b.0, b.1).cmp(&(a.0, a.1))))
            .map(|(u, v, w)| (u.to_string(), v.to_string(), w));

        Self {
            num_nodes,
            num_edges,
            avg_degree,
            density,
            heaviest_node,
            heaviest_edge,
        }
    }
}
