//! The core trait for a trained classifier.
use rayon::prelude::*;

use crate::Sample;
use crate::error::Result;


/// A trait that defines the prediction of a trained model.
pub trait Classifier {
    /// Predicts the label of the `row`-th example of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> Result<&str>;


    /// Predicts the labels of every example of `sample`.
    /// The examples are processed in parallel and
    /// the returned labels follow the row order of `sample`.
    /// If some examples fail, the error of the smallest failing row
    /// is returned.
    fn predict_all(&self, sample: &Sample) -> Result<Vec<String>>
        where Self: Sync
    {
        let n_sample = sample.shape().0;
        (0..n_sample).into_par_iter()
            .map(|row| self.predict(sample, row).map(str::to_string))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }
}
