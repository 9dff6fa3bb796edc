//! Exports the decision tree, the sample readers and the traits.
//!
pub use crate::decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DTreeClassifier,
    TreeConfig,
    Node,
    Threshold,
};


pub use crate::sample::{
    Sample,
    SampleReader,
    Feature,
    Instance,
    OwnedValue,
};


pub use crate::classifier::Classifier;
pub use crate::common::zero_one_loss;
pub use crate::error::TreeError;
