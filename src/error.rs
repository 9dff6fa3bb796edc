//! Defines the error type shared by every fallible operation in this crate.
use thiserror::Error;


/// Errors raised while reading samples, growing a tree,
/// or predicting with it.
#[derive(Debug, Error)]
pub enum TreeError {
    /// `predict` or `print_tree` was called before a successful `fit`.
    #[error("The decision tree is not fitted yet. Call `fit` first")]
    NotFitted,

    /// The sample has no rows.
    #[error("The sample has no examples")]
    EmptySample,

    /// The sample has no feature column to split on.
    #[error("The sample has no feature columns")]
    NoFeatures,

    /// The target column is absent or does not cover every row.
    #[error("The target column is not specified. Use `Sample::set_target`")]
    MissingTarget,

    /// A column that a split (or the caller) refers to does not exist.
    #[error("The feature \"{name}\" does not exist")]
    MissingFeature {
        /// Name of the missing column.
        name: String,
    },

    /// A value of the wrong kind was found for a feature.
    #[error("The feature \"{name}\" is expected to be {expected}")]
    FeatureTypeMismatch {
        /// Name of the offending column.
        name: String,
        /// Either `"numeric"` or `"categorical"`.
        expected: &'static str,
    },

    /// A column does not have one cell per example.
    #[error("The column \"{name}\" has {got} cells, expected {expected}")]
    LengthMismatch {
        /// Name of the offending column.
        name: String,
        /// Number of examples in the sample.
        expected: usize,
        /// Number of cells found.
        got: usize,
    },

    /// Two columns share the same name.
    #[error("The column \"{name}\" appears more than once")]
    DuplicateColumn {
        /// The duplicated name.
        name: String,
    },

    /// An empty cell (or a null) was found. Missing values are not supported.
    #[error("Missing value at line {line}, column \"{column}\"")]
    MissingValue {
        /// 1-indexed line of the source (0 for in-memory frames).
        line: usize,
        /// Column name.
        column: String,
    },

    /// A line of the source could not be parsed.
    #[error("Failed to parse line {line}: {message}")]
    Parse {
        /// 1-indexed line.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// `Node::route` was called on a leaf.
    #[error("A leaf node has no child to route to")]
    RouteOnLeaf,

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure reported by `polars`.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    /// Failure reported by `serde_json`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}


/// A `Result` alias over [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;
