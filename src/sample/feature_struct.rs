use serde::{Serialize, Deserialize};

use std::mem;


/// A borrowed cell of a feature column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// A real value. Totally ordered (`NaN` never reaches a `Sample`).
    Numeric(f64),
    /// A category label.
    Categorical(&'a str),
}


/// A named column of a [`Sample`](crate::Sample).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Feature {
    /// A real-valued column.
    Numeric {
        /// Column name.
        name: String,
        /// Cell values, one per example.
        vals: Vec<f64>,
    },
    /// A column of unordered category labels.
    Categorical {
        /// Column name.
        name: String,
        /// Cell values, one per example.
        vals: Vec<String>,
    },
}


impl Feature {
    /// Construct an empty numeric column named `name`.
    pub fn numeric<T: ToString>(name: T) -> Self {
        Self::Numeric { name: name.to_string(), vals: Vec::new() }
    }


    /// Construct an empty categorical column named `name`.
    pub fn categorical<T: ToString>(name: T) -> Self {
        Self::Categorical { name: name.to_string(), vals: Vec::new() }
    }


    /// Construct a numeric column from its values.
    pub fn numeric_from<T, I>(name: T, vals: I) -> Self
        where T: ToString,
              I: IntoIterator<Item = f64>,
    {
        Self::Numeric {
            name: name.to_string(),
            vals: vals.into_iter().collect(),
        }
    }


    /// Construct a categorical column from its values.
    pub fn categorical_from<T, I, S>(name: T, vals: I) -> Self
        where T: ToString,
              I: IntoIterator<Item = S>,
              S: ToString,
    {
        Self::Categorical {
            name: name.to_string(),
            vals: vals.into_iter().map(|v| v.to_string()).collect(),
        }
    }


    /// Returns the column name.
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric     { name, .. } => name,
            Self::Categorical { name, .. } => name,
        }
    }


    /// Returns `"numeric"` or `"categorical"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric     { .. } => "numeric",
            Self::Categorical { .. } => "categorical",
        }
    }


    /// Returns `true` for a numeric column.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }


    /// Returns `true` for a categorical column.
    pub fn is_categorical(&self) -> bool { !self.is_numeric() }


    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric     { vals, .. } => vals.len(),
            Self::Categorical { vals, .. } => vals.len(),
        }
    }


    /// Returns `true` if the column has no cell.
    pub fn is_empty(&self) -> bool { self.len() == 0 }


    /// Returns the `row`-th cell, or `None` if `row` is out of range.
    pub fn get(&self, row: usize) -> Option<Value<'_>> {
        match self {
            Self::Numeric { vals, .. } => {
                vals.get(row).map(|&v| Value::Numeric(v))
            },
            Self::Categorical { vals, .. } => {
                vals.get(row).map(|v| Value::Categorical(v))
            },
        }
    }


    /// Returns the `row`-th cell.
    /// Panics if `row` is out of range, like slice indexing.
    pub fn value(&self, row: usize) -> Value<'_> {
        match self {
            Self::Numeric     { vals, .. } => Value::Numeric(vals[row]),
            Self::Categorical { vals, .. } => Value::Categorical(&vals[row]),
        }
    }


    /// Returns a new column holding the rows `ix` in that order.
    pub(crate) fn select(&self, ix: &[usize]) -> Self {
        match self {
            Self::Numeric { name, vals } => Self::Numeric {
                name: name.clone(),
                vals: ix.iter().map(|&i| vals[i]).collect(),
            },
            Self::Categorical { name, vals } => Self::Categorical {
                name: name.clone(),
                vals: ix.iter().map(|&i| vals[i].clone()).collect(),
            },
        }
    }


    pub(crate) fn replace_name<T>(&mut self, name: T) -> String
        where T: ToString,
    {
        let n = name.to_string();
        match self {
            Self::Numeric     { name, .. } => mem::replace(name, n),
            Self::Categorical { name, .. } => mem::replace(name, n),
        }
    }


    /// Consumes the column and returns its cells as class labels.
    /// Numeric cells are rendered with `f64`'s `Display`,
    /// so `1.0` becomes `"1"`.
    pub(crate) fn into_labels(self) -> Vec<String> {
        match self {
            Self::Numeric { vals, .. } => {
                vals.into_iter().map(|v| v.to_string()).collect()
            },
            Self::Categorical { vals, .. } => vals,
        }
    }
}
