#![warn(missing_docs)]

//!
//! A crate that provides a binary decision tree classifier
//! trained by the CART algorithm with the Gini impurity.
//!
//! The tree is grown greedily on tabular data
//! that mixes numeric and categorical features:
//!
//! - Numeric features are split by thresholds `value <= t`,
//!     where `t` is a midpoint of two adjacent distinct values.
//! - Categorical features are split by equality `value == c`.
//!
//! At every node the split with the smallest weighted Gini impurity
//! of the two children is chosen.
//! A node becomes a leaf if it is pure, if it is deeper than
//! the maximal depth, or if no split is possible.
//!
//! ```
//! use cartree::prelude::*;
//!
//! let sample = Sample::from_features(vec![
//!     Feature::numeric_from("x", [1.0, 2.0, 3.0, 4.0]),
//!     Feature::categorical_from("class", ["0", "0", "1", "1"]),
//! ])
//! .unwrap()
//! .set_target("class")
//! .unwrap();
//!
//! let mut tree = DecisionTreeBuilder::new().build();
//! tree.fit(&sample).unwrap();
//!
//! assert_eq!(tree.predict(&sample).unwrap(), ["0", "0", "1", "1"]);
//! ```

pub mod error;
pub mod sample;
pub mod common;
pub mod classifier;
pub mod decision_tree;

pub mod prelude;


pub use error::{Result, TreeError};

pub use sample::{
    Sample,
    SampleReader,
    Feature,
    Value,
    Instance,
    OwnedValue,
    Row,
};

pub use classifier::Classifier;
pub use common::zero_one_loss;

pub use decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DTreeClassifier,
    TreeConfig,
    Node,
    BranchNode,
    LeafNode,
    Splitter,
    Threshold,
    LeftRight,
    gini_impurity,
    weighted_gini,
};
