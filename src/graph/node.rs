//! Tag node definition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::WEIGHT_ATTR;

/// A node in the tag graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagNode {
    /// Tag name; unique within a graph.
    pub name: String,
    /// Baseline 1 plus one per occurrence in a processed tag list.
    pub weight: u64,
    /// Externally assigned numeric attributes (centrality, scores, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, f64>,
}

impl TagNode {
    /// Create a new node with the baseline weight of 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: 1,
            attributes: BTreeMap::new(),
        }
    }

    /// Look up a numeric attribute. `"weight"` always resolves to [`Self::weight`].
    pub fn attribute(&self, attr: &str) -> Option<f64> {
        if attr == WEIGHT_ATTR {
            Some(self.weight as f64)
        } else {
            self.attributes.get(attr).copied()
        }
    }
}
