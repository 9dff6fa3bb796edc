use serde::{Serialize, Deserialize};

use std::fmt;

use crate::error::Result;


/// Training options of [`DecisionTree`](super::DecisionTree).
///
/// ```
/// use cartree::TreeConfig;
/// let config = TreeConfig::from_json(r#"{ "max_depth": 3 }"#).unwrap();
/// assert_eq!(config.max_depth, Some(3));
///
/// let config = TreeConfig::from_json("{}").unwrap();
/// assert_eq!(config.max_depth, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// A node at a depth greater than `max_depth` becomes a leaf.
    /// The root is at depth `0`. `None` grows the tree until
    /// every leaf is pure or cannot be split.
    pub max_depth: Option<usize>,
}


impl TreeConfig {
    /// Parses a configuration from a JSON object.
    /// Missing keys take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }
}


impl fmt::Display for TreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_depth {
            Some(depth) => write!(f, "max_depth: {depth}"),
            None => write!(f, "max_depth: unbounded"),
        }
    }
}
