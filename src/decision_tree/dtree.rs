use tracing::{debug, info, warn};

use crate::{Classifier, Sample};
use crate::common::checker;
use crate::error::{Result, TreeError};
use crate::sample::Instance;

use super::{
    node::*,
    criterion::*,
    config::TreeConfig,
    dtree_classifier::DTreeClassifier,
};


/// The CART decision tree algorithm.
/// Given a set of training examples for classification,
/// [`DecisionTree`] grows a binary tree by greedily choosing,
/// at every node, the split that minimizes the weighted Gini impurity
/// of the two children.
///
/// The code is based on the book:
/// [Classification and Regression
/// Trees](https://www.amazon.com/Classification-Regression-Wadsworth-Statistics-Probability/dp/0412048418)
/// by Leo Breiman, Jerome H. Friedman, Richard A. Olshen, and Charles J. Stone.
///
/// [`DecisionTree`] is constructed
/// by [`DecisionTreeBuilder`](super::DecisionTreeBuilder).
///
/// # Example
/// ```no_run
/// use cartree::prelude::*;
///
/// // Read the training data from the CSV file.
/// let file = "/path/to/data/file.csv";
/// let sample = SampleReader::new()
///     .file(file)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
///
/// // In this example, nodes below depth 2 are not split.
/// let mut tree = DecisionTreeBuilder::new()
///     .max_depth(2)
///     .build();
/// tree.fit(&sample).unwrap();
///
/// let predictions = tree.predict(&sample).unwrap();
/// let loss = zero_one_loss(sample.target(), &predictions);
/// println!("loss (train) is: {loss}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    config: TreeConfig,
    classifier: Option<DTreeClassifier>,
}


impl DecisionTree {
    /// Initialize [`DecisionTree`].
    /// This method is called only via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn from_config(config: TreeConfig) -> Self {
        Self { config, classifier: None }
    }


    /// Returns the training options.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }


    /// Returns `true` once [`DecisionTree::fit`] has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.classifier.is_some()
    }


    /// Returns the trained tree.
    pub fn classifier(&self) -> Result<&DTreeClassifier> {
        self.classifier.as_ref().ok_or(TreeError::NotFitted)
    }


    /// Grows a tree on `sample` and stores it,
    /// replacing the previously trained one.
    /// On failure the previous tree is kept.
    pub fn fit(&mut self, sample: &Sample) -> Result<()> {
        let tree = self.produce(sample)?;
        let root = tree.root();
        info!(
            n_nodes = root.n_nodes(),
            n_leaves = root.n_leaves(),
            depth = root.depth(),
            "tree successfully built",
        );
        self.classifier = Some(tree);
        Ok(())
    }


    /// Grows a tree on `sample` and returns it
    /// without touching the stored one.
    pub fn produce(&self, sample: &Sample) -> Result<DTreeClassifier> {
        checker::check_sample(sample)?;
        let target = sample.target_name()
            .ok_or(TreeError::MissingTarget)?;

        let n_sample = sample.shape().0;
        let indices = (0..n_sample).collect::<Vec<usize>>();

        let root = self.full_tree(sample, target, indices, 0)?;
        Ok(DTreeClassifier::from(root))
    }


    /// Predicts the class of every example of `sample`, in row order.
    pub fn predict(&self, sample: &Sample) -> Result<Vec<String>> {
        self.classifier()?.predict_all(sample)
    }


    /// Predicts the class of a single record.
    pub fn predict_instance<I>(&self, instance: &I) -> Result<&str>
        where I: Instance + ?Sized
    {
        self.classifier()?.predict_instance(instance)
    }


    /// Prints the trained tree to the standard output.
    pub fn print_tree(&self) -> Result<()> {
        self.classifier()?.print_tree();
        Ok(())
    }


    /// Returns the text that [`DecisionTree::print_tree`] shows,
    /// without highlighting.
    pub fn tree_text(&self) -> Result<String> {
        Ok(self.classifier()?.tree_text())
    }


    /// Construct a binary tree on the examples `indices`.
    /// `depth` is the depth of the node being built.
    fn full_tree(
        &self,
        sample: &Sample,
        target: &str,
        indices: Vec<usize>,
        depth: usize,
    ) -> Result<Node>
    {
        let n_sample = indices.len();
        let counts = label_counts(sample.target(), &indices[..]);
        let impurity = gini_impurity(counts.values().copied());
        let label = majority_label(&counts)
            .ok_or(TreeError::EmptySample)?;


        let too_deep = self.config.max_depth
            .is_some_and(|max_depth| depth > max_depth);
        if impurity == 0f64 || too_deep {
            debug!(depth, n_sample, label, impurity, "leaf");
            return Ok(Node::leaf(target, label, impurity, n_sample));
        }


        // Find the best pair of feature name and threshold.
        let Some(BestSplit { rule, score }) = best_split(sample, &indices[..])
        else {
            warn!(
                depth, n_sample, label, impurity,
                "no candidate split for an impure node, forced to a leaf",
            );
            return Ok(Node::leaf(target, label, impurity, n_sample));
        };


        // Split the train data for left/right childrens
        let feature = sample.feature(rule.feature())
            .ok_or_else(|| TreeError::MissingFeature {
                name: rule.feature().to_string(),
            })?;
        let (lindices, rindices) = rule.partition(feature, &indices[..])?;
        debug!(
            depth,
            feature = rule.feature(),
            threshold = %rule.threshold(),
            impurity = score.0,
            n_left = lindices.len(),
            n_right = rindices.len(),
            "split",
        );


        let ltree = self.full_tree(sample, target, lindices, depth + 1)?;
        let rtree = self.full_tree(sample, target, rindices, depth + 1)?;

        Ok(Node::branch(rule, score.0, n_sample, ltree, rtree))
    }
}
