//! Defines some common functions used in this library.

/// Defines loss functions used to evaluate a classifier.
pub mod loss_functions;

/// Defines some checker functions.
pub(crate) mod checker;

pub use loss_functions::zero_one_loss;
