//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::Sample;
use crate::error::{Result, TreeError};


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn check_sample(sample: &Sample) -> Result<()> {
    let (n_sample, n_feature) = sample.shape();


    // The sample must have at least one example.
    if n_sample == 0 {
        return Err(TreeError::EmptySample);
    }


    // Every example must be labeled.
    if !sample.has_target() {
        return Err(TreeError::MissingTarget);
    }


    // `sample` must have a feature.
    if n_feature == 0 {
        return Err(TreeError::NoFeatures);
    }

    Ok(())
}
