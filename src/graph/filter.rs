//! Top-K filtering: keep the highest-ranked tags and their induced subgraph.

use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::errors::{Result, TagGraphError};
use crate::graph::{TagGraph, WEIGHT_ATTR};

/// Selects the K nodes with the largest attribute value.
#[derive(Debug, Clone)]
pub struct TopKFilter {
    k: usize,
    attribute: String,
}

impl TopKFilter {
    /// Filter on `attribute`.
    pub fn new(k: usize, attribute: impl Into<String>) -> Self {
        Self {
            k,
            attribute: attribute.into(),
        }
    }

    /// Filter on the builder-maintained `weight` attribute.
    pub fn by_weight(k: usize) -> Self {
        Self::new(k, WEIGHT_ATTR)
    }

    /// Return the induced subgraph over the top-K nodes.
    ///
    /// Nodes are ranked by descending attribute value; ties go to the
    /// lexicographically smaller tag name. Every node must carry the
    /// attribute with a finite value. The source graph is not modified and weights are copied
    /// through unchanged. `k >= node_count` yields a copy of the whole graph,
    /// `k == 0` yields an empty graph.
    pub fn apply(&self, graph: &TagGraph) -> Result<TagGraph> {
        let inner = graph.inner();

        let mut ranked = Vec::with_capacity(inner.node_count());
        for idx in inner.node_indices() {
            let node = &inner[idx];
            let value = node.attribute(&self.attribute).ok_or_else(|| {
                TagGraphError::InvalidArgument(format!(
                    "node '{}' has no attribute '{}'",
                    node.name, self.attribute
                ))
            })?;
            if !value.is_finite() {
                return Err(TagGraphError::InvalidArgument(format!(
                    "node '{}' has non-finite attribute '{}': {value}",
                    node.name, self.attribute
                )));
            }
            ranked.push((idx, value));
        }

        if self.k >= ranked.len() {
            return Ok(graph.clone());
        }

        ranked.sort_by(|(ia, va), (ib, vb)| {
            vb.total_cmp(va)
                .then_with(|| inner[*ia].name.cmp(&inner[*ib].name))
        });
        ranked.truncate(self.k);
        // Kept nodes retain their relative index order.
        ranked.sort_by_key(|(idx, _)| *idx);

        let mut out = TagGraph::with_capacity(ranked.len(), 0);
        let mut mapping = vec![None; inner.node_count()];
        for (idx, _) in &ranked {
            mapping[idx.index()] = Some(out.add_node(inner[*idx].clone()));
        }

        for edge in inner.edge_references() {
            if let (Some(a), Some(b)) = (mapping[edge.source().index()], mapping[edge.target().index()]) {
                out.add_edge(a, b, *edge.weight());
            }
        }

        debug!(
            k = self.k,
            attribute = %self.attribute,
            nodes = out.node_count(),
            edges = out.edge_count(),
            "top-k filter applied"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_tag_graph, collect_unique_tags};
    use crate::types::TagList;

    fn sample() -> TagGraph {
        let input: Vec<TagList> = [
            vec!["a", "b"],
            vec!["b", "c"],
            vec!["c", "a", "d"],
            vec!["d", "b"],
        ]
        .iter()
        .map(|l| l.iter().map(|s| s.to_string()).collect())
        .collect();
        let tags = collect_unique_tags(&input).unwrap();
        build_tag_graph(&input, &tags).unwrap()
    }

    fn with_score(mut g: TagGraph) -> TagGraph {
        for (name, score) in [("a", 0.9), ("b", 0.7), ("c", 0.1), ("d", 0.5)] {
            g.set_node_attribute(name, "score", score).unwrap();
        }
        g
    }

    #[test]
    fn test_drops_lowest_external_attribute() {
        let g = with_score(sample());
        let filtered = TopKFilter::new(3, "score").apply(&g).unwrap();

        assert_eq!(filtered.node_count(), 3);
        assert_eq!(filtered.edge_count(), 3);
        assert!(matches!(filtered.node("c"), Err(TagGraphError::NodeNotFound(_))));
        // Source graph is untouched.
        assert_eq!(g.node_count(), 4);
        assert!(g.node("c").is_ok());
    }

    #[test]
    fn test_k_at_least_node_count_is_identity() {
        let g = sample();
        for k in [4, 5, 100] {
            let filtered = TopKFilter::by_weight(k).apply(&g).unwrap();
            assert_eq!(filtered, g);
            assert_eq!(filtered.edge_count(), g.edge_count());
        }
    }

    #[test]
    fn test_k_zero_is_empty() {
        let filtered = TopKFilter::by_weight(0).apply(&sample()).unwrap();
        assert_eq!(filtered.node_count(), 0);
        assert_eq!(filtered.edge_count(), 0);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let g = with_score(sample());
        for attr in ["weight", "score"] {
            let once = TopKFilter::new(2, attr).apply(&g).unwrap();
            let twice = TopKFilter::new(2, attr).apply(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_weight_ties_break_by_name() {
        // b has weight 4; a, c and d tie at 3.
        let filtered = TopKFilter::by_weight(2).apply(&sample()).unwrap();
        let names: Vec<_> = filtered.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(filtered.edge("a", "b").unwrap().weight, 1);
    }

    #[test]
    fn test_weights_are_preserved() {
        let g = sample();
        let filtered = TopKFilter::by_weight(3).apply(&g).unwrap();
        for node in filtered.nodes() {
            assert_eq!(node.weight, g.node(&node.name).unwrap().weight);
        }
        for (u, v, e) in filtered.edges() {
            assert_eq!(e, g.edge(u, v).unwrap());
        }
    }

    #[test]
    fn test_missing_attribute_is_invalid() {
        let mut g = sample();
        g.set_node_attribute("a", "score", 1.0).unwrap();
        let err = TopKFilter::new(2, "score").apply(&g).unwrap_err();
        assert!(matches!(err, TagGraphError::InvalidArgument(_)));
    }

    fn wide_graph(n: usize) -> TagGraph {
        let input: Vec<TagList> = (0..n)
            .map(|i| vec![format!("tag{i:02}"), format!("tag{:02}", (i + 1) % n)])
            .collect();
        let tags = collect_unique_tags(&input).unwrap();
        build_tag_graph(&input, &tags).unwrap()
    }

    #[test]
    fn test_non_finite_attribute_is_rejected() {
        let mut g = wide_graph(40);
        let names: Vec<String> = g.nodes().map(|n| n.name.clone()).collect();
        for (i, name) in names.iter().enumerate() {
            let score = if i % 3 == 0 { f64::NAN } else { i as f64 };
            let res = g.set_node_attribute(name, "score", score);
            assert_eq!(res.is_err(), i % 3 == 0, "{name}");
        }
        assert!(matches!(
            g.set_node_attribute("tag01", "score", f64::INFINITY),
            Err(TagGraphError::InvalidArgument(_))
        ));

        // Values written around the setter are caught by the filter itself.
        let mut raw = wide_graph(40);
        for (i, name) in names.iter().enumerate() {
            let score = if i % 3 == 0 { f64::NAN } else { i as f64 };
            let idx = raw.index_of(name).unwrap();
            raw.node_weight_mut(idx).unwrap().attributes.insert("score".into(), score);
        }
        let err = TopKFilter::new(5, "score").apply(&raw).unwrap_err();
        assert!(matches!(err, TagGraphError::InvalidArgument(_)));
    }

    #[test]
    fn test_large_graph_ranks_by_score() {
        let mut g = wide_graph(40);
        let names: Vec<String> = g.nodes().map(|n| n.name.clone()).collect();
        for (i, name) in names.iter().enumerate() {
            // Pairs of equal scores exercise the name tie-break.
            g.set_node_attribute(name, "score", (i / 2) as f64).unwrap();
        }
        let top = TopKFilter::new(5, "score").apply(&g).unwrap();
        let kept: Vec<_> = top.nodes().map(|n| n.name.as_str()).collect();
        // tag34 and tag35 tie at 17 for the last slot.
        assert_eq!(kept, vec!["tag34", "tag36", "tag37", "tag38", "tag39"]);
    }
}
