//! Record-level views used to route a single example down a tree.
use serde::{Serialize, Deserialize};

use std::collections::{BTreeMap, HashMap};

use super::feature_struct::Value;
use super::sample_struct::Sample;


/// A single example whose cells can be looked up by feature name.
///
/// Anything implementing this trait can be routed through a tree,
/// so one-off predictions do not need a full [`Sample`].
pub trait Instance {
    /// Returns the value of the feature `name`,
    /// or `None` if this example has no such feature.
    fn value(&self, name: &str) -> Option<Value<'_>>;
}


/// The `row`-th example of a [`Sample`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub(super) sample: &'a Sample,
    pub(super) row: usize,
}


impl Row<'_> {
    /// Returns the row index in the underlying sample.
    pub fn index(&self) -> usize { self.row }
}


impl Instance for Row<'_> {
    #[inline]
    fn value(&self, name: &str) -> Option<Value<'_>> {
        self.sample.feature(name)?.get(self.row)
    }
}


/// An owned cell, used to build ad-hoc examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnedValue {
    /// A real value.
    Numeric(f64),
    /// A category label.
    Categorical(String),
}


impl OwnedValue {
    /// Borrow `self` as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Self::Numeric(v)     => Value::Numeric(*v),
            Self::Categorical(c) => Value::Categorical(c),
        }
    }
}


impl From<f64> for OwnedValue {
    fn from(value: f64) -> Self { Self::Numeric(value) }
}


impl From<&str> for OwnedValue {
    fn from(value: &str) -> Self { Self::Categorical(value.to_string()) }
}


impl From<String> for OwnedValue {
    fn from(value: String) -> Self { Self::Categorical(value) }
}


impl Instance for HashMap<String, OwnedValue> {
    fn value(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(OwnedValue::as_value)
    }
}


impl Instance for BTreeMap<String, OwnedValue> {
    fn value(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(OwnedValue::as_value)
    }
}
