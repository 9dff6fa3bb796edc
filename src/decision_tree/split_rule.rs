//! This file defines split rules for decision tree.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::error::{Result, TreeError};
use crate::sample::{Feature, Instance, Value};


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    /// The test succeeded.
    Left,
    /// The test failed.
    Right,
}


/// The cut value of a branch.
/// A numeric threshold sends `value <= t` to the left,
/// a categorical one sends `value == c` to the left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Threshold {
    /// Cut point of a numeric feature.
    Numeric(f64),
    /// Category of a categorical feature.
    Categorical(String),
}


impl Threshold {
    /// Returns `"numeric"` or `"categorical"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_)     => "numeric",
            Self::Categorical(_) => "categorical",
        }
    }


    /// Decides the side of `value`.
    /// Returns `None` if `value` and `self` are of different kinds.
    #[inline]
    pub fn side(&self, value: Value<'_>) -> Option<LeftRight> {
        let left = match (self, value) {
            (Self::Numeric(t), Value::Numeric(v)) => v <= *t,
            (Self::Categorical(c), Value::Categorical(v)) => v == c.as_str(),
            _ => return None,
        };
        Some(if left { LeftRight::Left } else { LeftRight::Right })
    }
}


impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(t)     => write!(f, "{t}"),
            Self::Categorical(c) => write!(f, "{c}"),
        }
    }
}


/// A pair of feature name and threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    pub(crate) feature: String,
    pub(crate) threshold: Threshold,
}


impl Splitter {
    #[inline]
    pub(crate) fn new(name: &str, threshold: Threshold) -> Self {
        let feature = name.to_string();
        Self {
            feature,
            threshold
        }
    }


    /// Name of the tested feature.
    pub fn feature(&self) -> &str { &self.feature }


    /// The threshold of the test.
    pub fn threshold(&self) -> &Threshold { &self.threshold }


    /// Defines the splitting.
    #[inline]
    pub fn split<I>(&self, instance: &I) -> Result<LeftRight>
        where I: Instance + ?Sized
    {
        let name = &self.feature;

        let value = instance.value(name)
            .ok_or_else(|| TreeError::MissingFeature { name: name.clone() })?;

        self.threshold.side(value)
            .ok_or_else(|| TreeError::FeatureTypeMismatch {
                name: name.clone(),
                expected: self.threshold.kind(),
            })
    }


    /// Partitions the rows `idx` of `feature` into `(left, right)`,
    /// keeping the relative order of `idx` on each side.
    pub(crate) fn partition(&self, feature: &Feature, idx: &[usize])
        -> Result<(Vec<usize>, Vec<usize>)>
    {
        let mut lindices = Vec::new();
        let mut rindices = Vec::new();
        for &i in idx {
            match self.threshold.side(feature.value(i)) {
                Some(LeftRight::Left)  => { lindices.push(i); },
                Some(LeftRight::Right) => { rindices.push(i); },
                None => {
                    return Err(TreeError::FeatureTypeMismatch {
                        name: self.feature.clone(),
                        expected: self.threshold.kind(),
                    });
                },
            }
        }
        Ok((lindices, rindices))
    }
}
