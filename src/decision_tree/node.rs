//! Defines the inner representation
//! of the Decision Tree class.
use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::error::{Result, TreeError};
use crate::sample::Instance;
use super::split_rule::*;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) impurity: f64,
    pub(super) n_sample: usize,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


/// Represents the leaf nodes of decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) target: String,
    pub(super) label: String,
    pub(super) impurity: f64,
    pub(super) n_sample: usize,
}


/// The branch a node hangs from, used when printing a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Root,
    Left,
    Right,
}


impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self {
            Self::Root  => "root",
            Self::Left  => "left",
            Self::Right => "right",
        };
        write!(f, "{side}")
    }
}


impl Node {
    /// Construct a branch node from the arguments.
    /// `impurity` is the weighted impurity of the split.
    #[inline]
    pub(super) fn branch(
        rule: Splitter,
        impurity: f64,
        n_sample: usize,
        left: Node,
        right: Node,
    ) -> Self
    {
        let left = Box::new(left);
        let right = Box::new(right);
        Self::Branch(BranchNode { rule, impurity, n_sample, left, right })
    }


    /// Construct a leaf node from the given arguments.
    /// `target` is the name of the target column.
    #[inline]
    pub(super) fn leaf(
        target: &str,
        label: &str,
        impurity: f64,
        n_sample: usize,
    ) -> Self
    {
        Self::Leaf(LeafNode {
            target: target.to_string(),
            label: label.to_string(),
            impurity,
            n_sample,
        })
    }


    /// Returns `true` iff this node has no child.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }


    /// Returns the child that `instance` descends into.
    /// Calling this on a leaf returns [`TreeError::RouteOnLeaf`].
    #[inline]
    pub fn route<I>(&self, instance: &I) -> Result<&Node>
        where I: Instance + ?Sized
    {
        match self {
            Node::Branch(ref branch) => {
                match branch.rule.split(instance)? {
                    LeftRight::Left  => Ok(&branch.left),
                    LeftRight::Right => Ok(&branch.right),
                }
            },
            Node::Leaf(_) => Err(TreeError::RouteOnLeaf),
        }
    }


    /// Follows [`Node::route`] from `self` down to a leaf
    /// and returns its class label.
    pub fn predict<I>(&self, instance: &I) -> Result<&str>
        where I: Instance + ?Sized
    {
        let mut node = self;
        while !node.is_leaf() {
            node = node.route(instance)?;
        }
        Ok(node.predicted_class().unwrap_or_default())
    }


    /// Returns the predicted class of a leaf, `None` for a branch.
    pub fn predicted_class(&self) -> Option<&str> {
        match self {
            Node::Branch(_) => None,
            Node::Leaf(ref leaf) => Some(&leaf.label),
        }
    }


    /// The tested feature of a branch,
    /// or the name of the target column for a leaf.
    pub fn feature(&self) -> &str {
        match self {
            Node::Branch(ref branch) => &branch.rule.feature,
            Node::Leaf(ref leaf) => &leaf.target,
        }
    }


    /// The threshold of a branch, `None` for a leaf.
    pub fn threshold(&self) -> Option<&Threshold> {
        match self {
            Node::Branch(ref branch) => Some(&branch.rule.threshold),
            Node::Leaf(_) => None,
        }
    }


    /// The weighted Gini impurity of the split for a branch,
    /// the Gini impurity of the examples for a leaf.
    pub fn impurity(&self) -> f64 {
        match self {
            Node::Branch(ref branch) => branch.impurity,
            Node::Leaf(ref leaf) => leaf.impurity,
        }
    }


    /// The number of training examples that reached this node.
    pub fn n_sample(&self) -> usize {
        match self {
            Node::Branch(ref branch) => branch.n_sample,
            Node::Leaf(ref leaf) => leaf.n_sample,
        }
    }


    /// The left child of a branch.
    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Branch(ref branch) => Some(&branch.left),
            Node::Leaf(_) => None,
        }
    }


    /// The right child of a branch.
    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Branch(ref branch) => Some(&branch.right),
            Node::Leaf(_) => None,
        }
    }


    /// Number of edges on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Branch(ref branch) => {
                1 + branch.left.depth().max(branch.right.depth())
            },
            Node::Leaf(_) => 0,
        }
    }


    /// Returns the number of leaves of this sub-tree.
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Branch(ref branch) => {
                branch.left.n_leaves() + branch.right.n_leaves()
            },
            Node::Leaf(_) => 1,
        }
    }


    /// Returns the number of nodes of this sub-tree.
    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Branch(ref branch) => {
                1 + branch.left.n_nodes() + branch.right.n_nodes()
            },
            Node::Leaf(_) => 1,
        }
    }


    fn threshold_text(&self) -> String {
        match self {
            Node::Branch(ref branch) => branch.rule.threshold.to_string(),
            Node::Leaf(ref leaf) => leaf.label.clone(),
        }
    }


    /// Appends the pre-order dump of this sub-tree to `lines`.
    pub(super) fn dump(
        &self,
        level: usize,
        side: Side,
        colored: bool,
        lines: &mut Vec<String>,
    )
    {
        let indent = "  ".repeat(level);
        let line = if colored {
            let node = if self.is_leaf() {
                "leaf".bold().green()
            } else {
                "branch".bold().blue()
            };
            format!(
                "{indent}[{side}] level: {level}, {node} \
                 feat_name: {feat}, threshold: {thr}, \
                 gini_impurity: {imp}, is_leaf: {leaf}",
                side = side.to_string().bold().red(),
                level = level.to_string().red(),
                feat = self.feature().bold(),
                thr = self.threshold_text().yellow(),
                imp = format!("{:.4}", self.impurity()).cyan(),
                leaf = self.is_leaf(),
            )
        } else {
            format!("{indent}[{side}] level: {level}, {self}")
        };
        lines.push(line);

        if let Node::Branch(ref branch) = self {
            branch.left.dump(level + 1, Side::Left, colored, lines);
            branch.right.dump(level + 1, Side::Right, colored, lines);
        }
    }


    pub(super) fn to_dot_info(&self, id: usize) -> (Vec<String>, usize) {
        match self {
            Node::Branch(b) => {
                let test = match b.rule.threshold {
                    Threshold::Numeric(t) => format!("<= {t:.2}"),
                    Threshold::Categorical(ref c) => format!("== {c}"),
                };
                let b_info = format!(
                    "\tnode_{id} [ label = \"{feat} {test} ?\" ];\n",
                    feat = b.rule.feature,
                );

                let (l_info, next_id) = b.left.to_dot_info(id + 1);
                let (mut r_info, ret_id) = b.right.to_dot_info(next_id);

                let mut info = l_info;
                info.push(b_info);
                info.append(&mut r_info);

                let l_edge = format!(
                    "\tnode_{id} -- node_{l_id} [ label = \"Yes\" ];\n",
                    l_id = id + 1
                );
                let r_edge = format!(
                    "\tnode_{id} -- node_{r_id} [ label = \"No\" ];\n",
                    r_id = next_id
                );

                info.push(l_edge);
                info.push(r_edge);

                (info, ret_id)
            },
            Node::Leaf(l) => {
                let info = format!(
                    "\tnode_{id} [ \
                     label = \"{p}\", \
                     shape = box, \
                     ];\n",
                    p = l.label
                );

                (vec![info], id + 1)
            }
        }
    }
}


impl fmt::Display for Node {
    /// One-line summary of this node, without its children.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feat_name: {}, threshold: {}, gini_impurity: {:.4}, is_leaf: {}",
            self.feature(),
            self.threshold_text(),
            self.impurity(),
            self.is_leaf(),
        )
    }
}
