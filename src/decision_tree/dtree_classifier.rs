//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::path::Path;
use std::fs::File;
use std::io::prelude::*;

use crate::{Classifier, Sample};
use crate::error::Result;
use crate::sample::Instance;
use super::node::*;


/// Decision tree classifier.
/// This struct is just a wrapper of `Node`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DTreeClassifier {
    root: Node
}


impl From<Node> for DTreeClassifier {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root }
    }
}


impl Classifier for DTreeClassifier {
    fn predict(&self, sample: &Sample, row: usize) -> Result<&str> {
        self.root.predict(&sample.row(row))
    }
}


impl DTreeClassifier {
    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Predicts the class of a single record.
    pub fn predict_instance<I>(&self, instance: &I) -> Result<&str>
        where I: Instance + ?Sized
    {
        self.root.predict(instance)
    }


    /// Serializes the tree into a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }


    /// Restores a tree from the output of [`DTreeClassifier::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let tree = serde_json::from_str(json)?;
        Ok(tree)
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph DecisionTree {\n")?;

        let info = self.root.to_dot_info(0).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;

        Ok(())
    }


    /// Returns the pre-order dump of the tree,
    /// one node per line.
    pub fn tree_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.root.n_nodes());
        self.root.dump(0, Side::Root, false, &mut lines);
        lines.join("\n")
    }


    /// Prints the tree to the standard output with highlighting.
    pub fn print_tree(&self) {
        let mut lines = Vec::with_capacity(self.root.n_nodes());
        self.root.dump(0, Side::Root, true, &mut lines);
        for line in lines {
            println!("{line}");
        }
    }
}


impl fmt::Display for DTreeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree_text())
    }
}
