//! Configuration for graph filtering and token clouds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TagGraphError};
use crate::graph::WEIGHT_ATTR;

/// Settings shared by the pipeline and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagGraphConfig {
    /// Number of nodes kept by the top-K filter.
    pub top_k: usize,
    /// Node attribute the top-K filter ranks by.
    pub rank_attribute: String,
    /// Number of entries fed to artist/album/tag clouds.
    pub cloud_threshold: usize,
}

impl Default for TagGraphConfig {
    fn default() -> Self {
        Self {
            top_k: 20,
            rank_attribute: WEIGHT_ATTR.to_string(),
            cloud_threshold: 20,
        }
    }
}

impl TagGraphConfig {
    /// Load a config from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.rank_attribute.trim().is_empty() {
            return Err(TagGraphError::Config(
                "rank_attribute must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TagGraphConfig = serde_json::from_str(r#"{"top_k": 5}"#).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.rank_attribute, "weight");
        assert_eq!(config.cloud_threshold, 20);
    }

    #[test]
    fn test_empty_rank_attribute_is_rejected() {
        let config = TagGraphConfig {
            rank_attribute: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TagGraphError::Config(_))));
    }
}
