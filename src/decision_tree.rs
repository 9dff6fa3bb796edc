//! Defines the CART decision tree classifier.

/// Defines the inner representation of `DTreeClassifier`.
mod node;
/// Defines the split rule of a branch.
mod split_rule;
/// Gini impurity and the best-split search.
pub(crate) mod criterion;
/// Training options.
mod config;
/// Builder of `DecisionTree`.
mod builder;
/// Defines `DTreeClassifier`.
mod dtree_classifier;
/// The tree growing algorithm.
mod dtree;


pub use node::{Node, BranchNode, LeafNode};
pub use split_rule::{LeftRight, Splitter, Threshold};
pub use criterion::{gini_impurity, weighted_gini};
pub use config::TreeConfig;
pub use builder::DecisionTreeBuilder;
pub use dtree_classifier::DTreeClassifier;
pub use dtree::DecisionTree;
