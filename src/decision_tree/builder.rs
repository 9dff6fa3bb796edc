use super::config::TreeConfig;
use super::dtree::DecisionTree;


/// A struct that builds [`DecisionTree`].
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```
/// use cartree::prelude::*;
///
/// let tree = DecisionTreeBuilder::new()
///     .max_depth(3)
///     .build();
/// assert!(!tree.is_fitted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeBuilder {
    config: TreeConfig,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, the depth of the tree is not bounded.
    pub fn new() -> Self {
        Self::default()
    }


    /// Start from a loaded [`TreeConfig`].
    pub fn from_config(config: TreeConfig) -> Self {
        Self { config }
    }


    /// Specify the maximal depth of the tree.
    /// Nodes deeper than `depth` are not split.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }


    /// Remove the depth bound.
    pub fn unbounded(mut self) -> Self {
        self.config.max_depth = None;
        self
    }


    /// Build a [`DecisionTree`].
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        DecisionTree::from_config(self.config)
    }
}
