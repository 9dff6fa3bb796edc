//! Gini impurity and the exhaustive best-split search.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Mul, Add};

use crate::sample::{Feature, Sample};
use super::split_rule::*;


/// Maps each class label to its number of occurrences.
/// A `BTreeMap` so that iteration is in ascending label order.
pub(crate) type LabelToCount<'a> = BTreeMap<&'a str, usize>;


/// Score for a splitting.
/// This is just a wrapper for `f64`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug)]
pub(crate) struct Score(pub(crate) f64);


impl From<f64> for Score {
    #[inline(always)]
    fn from(score: f64) -> Self {
        Self(score)
    }
}


impl PartialEq for Score {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}


impl PartialOrd for Score {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}


impl Mul for Score {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self::Output {
        Self(self.0 * other.0)
    }
}


impl Add for Score {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}


/// The winner of [`best_split`].
#[derive(Debug, Clone)]
pub(crate) struct BestSplit {
    pub(crate) rule: Splitter,
    pub(crate) score: Score,
}


/// Returns the Gini impurity `1 - Σ p_c²` of the given class counts.
/// An empty collection has impurity `0`.
///
/// ```
/// use cartree::gini_impurity;
/// let gini = gini_impurity([3, 1]);
/// assert!((gini - 0.375).abs() < 1e-12);
/// assert_eq!(gini_impurity([5]), 0.0);
/// ```
pub fn gini_impurity<I>(counts: I) -> f64
    where I: IntoIterator<Item = usize>
{
    let counts = counts.into_iter().collect::<Vec<_>>();
    let total = counts.iter().sum::<usize>();
    if total == 0 { return 0.0; }

    let total = total as f64;
    let correct = counts.iter()
        .map(|&c| (c as f64 / total).powi(2))
        .sum::<f64>();

    (1.0 - correct).max(0.0)
}


/// Returns the size-weighted average of two Gini impurities.
///
/// ```
/// use cartree::weighted_gini;
/// let score = weighted_gini([2, 0], [0, 2]);
/// assert_eq!(score, 0.0);
/// ```
pub fn weighted_gini<L, R>(left: L, right: R) -> f64
    where L: IntoIterator<Item = usize>,
          R: IntoIterator<Item = usize>,
{
    let left = left.into_iter().collect::<Vec<_>>();
    let right = right.into_iter().collect::<Vec<_>>();
    let n_left = left.iter().sum::<usize>();
    let n_right = right.iter().sum::<usize>();

    weighted(n_left, gini_impurity(left), n_right, gini_impurity(right)).0
}


#[inline]
fn weighted(n_left: usize, g_left: f64, n_right: usize, g_right: f64)
    -> Score
{
    let total = (n_left + n_right) as f64;
    if total == 0.0 { return Score(0.0); }

    let lp = Score(n_left as f64 / total);
    let rp = Score(n_right as f64 / total);
    lp * Score(g_left) + rp * Score(g_right)
}


/// Counts the labels of the rows `idx`.
pub(crate) fn label_counts<'a>(target: &'a [String], idx: &[usize])
    -> LabelToCount<'a>
{
    let mut counter = LabelToCount::new();
    for &i in idx {
        *counter.entry(target[i].as_str()).or_insert(0) += 1;
    }
    counter
}


/// Returns the most frequent label.
/// Ties go to the smallest label, since `counts` iterates
/// in ascending label order and only a strictly larger count wins.
pub(crate) fn majority_label<'a>(counts: &LabelToCount<'a>) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for (&label, &count) in counts {
        match best {
            Some((_, c)) if c >= count => {},
            _ => { best = Some((label, count)); },
        }
    }
    best.map(|(label, _)| label)
}


/// Enumerates the candidate thresholds of `feature` on the rows `idx`.
///
/// - Categorical: every distinct category, in ascending order.
/// - Numeric: the midpoint of every adjacent pair of
///   distinct values, in ascending order.
///
/// A feature with fewer than two distinct values has no candidate.
pub(crate) fn candidates(feature: &Feature, idx: &[usize]) -> Vec<Threshold> {
    match feature {
        Feature::Numeric { vals, .. } => {
            let mut values = idx.iter()
                .map(|&i| vals[i])
                .collect::<Vec<_>>();
            values.sort_by(f64::total_cmp);
            values.dedup();

            values.windows(2)
                .map(|w| Threshold::Numeric(midpoint(w[0], w[1])))
                .collect()
        },
        Feature::Categorical { vals, .. } => {
            let values = idx.iter()
                .map(|&i| vals[i].as_str())
                .collect::<BTreeSet<_>>();
            if values.len() < 2 { return Vec::new(); }

            values.into_iter()
                .map(|c| Threshold::Categorical(c.to_string()))
                .collect()
        },
    }
}


/// Returns a cut point `t` with `a <= t < b` for `a < b`.
/// The midpoint rounds up onto `b` for adjacent floats and
/// overflows for huge values; `a` is used in both cases.
#[inline]
fn midpoint(a: f64, b: f64) -> f64 {
    let mid = a + (b - a) / 2.0;
    if mid < b { mid } else { a }
}


/// Scores splitting the rows `idx` on `feature` at `threshold`
/// by the weighted Gini impurity of both sides.
/// Returns `None` if one side would be empty.
pub(crate) fn split_score(
    feature: &Feature,
    threshold: &Threshold,
    target: &[String],
    idx: &[usize],
) -> Option<Score>
{
    let mut left = LabelToCount::new();
    let mut right = LabelToCount::new();
    let mut n_left = 0_usize;
    let mut n_right = 0_usize;

    for &i in idx {
        let y = target[i].as_str();
        match threshold.side(feature.value(i))? {
            LeftRight::Left => {
                *left.entry(y).or_insert(0) += 1;
                n_left += 1;
            },
            LeftRight::Right => {
                *right.entry(y).or_insert(0) += 1;
                n_right += 1;
            },
        }
    }

    if n_left == 0 || n_right == 0 {
        return None;
    }

    let g_left = gini_impurity(left.into_values());
    let g_right = gini_impurity(right.into_values());
    Some(weighted(n_left, g_left, n_right, g_right))
}


/// Returns the best threshold of a single feature.
/// Ties go to the first candidate.
fn best_split_on(feature: &Feature, target: &[String], idx: &[usize])
    -> Option<(Threshold, Score)>
{
    let mut best: Option<(Threshold, Score)> = None;
    for threshold in candidates(feature, idx) {
        let Some(score) = split_score(feature, &threshold, target, idx)
            else { continue; };

        match best {
            Some((_, b)) if b <= score => {},
            _ => { best = Some((threshold, score)); },
        }
    }
    best
}


/// Returns the pair of feature and threshold that
/// minimizes the weighted Gini impurity of the rows `idx`,
/// or `None` if no feature has a candidate threshold.
///
/// Features are scored in column order, so ties go to
/// the earliest feature and then to the earliest threshold.
pub(crate) fn best_split(sample: &Sample, idx: &[usize]) -> Option<BestSplit> {
    let target = sample.target();

    sample.features()
        .iter()
        .filter_map(|feature| {
            best_split_on(feature, target, idx)
                .map(|(threshold, score)| (feature.name(), threshold, score))
        })
        .fold(None, |best: Option<BestSplit>, (name, threshold, score)| {
            match best {
                Some(b) if b.score <= score => Some(b),
                _ => Some(BestSplit {
                    rule: Splitter::new(name, threshold),
                    score,
                }),
            }
        })
}
