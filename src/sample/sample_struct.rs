use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Index;

use polars::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::{Result, TreeError};
use super::feature_struct::*;
use super::instance::Row;


/// Struct `Sample` holds a batch of examples as typed columns
/// plus one categorical target column.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target_name: Option<String>,
    pub(super) target: Vec<String>,
    pub(super) n_sample: usize,
}


impl Sample {
    /// Construct a [`Sample`] without target from the given columns.
    /// Every column must have the same length and a unique name.
    /// Numeric columns must not contain `NaN`.
    pub fn from_features(features: Vec<Feature>) -> Result<Self> {
        let n_sample = features.first().map_or(0, Feature::len);

        let mut name_to_index = HashMap::with_capacity(features.len());
        for (i, feat) in features.iter().enumerate() {
            if feat.len() != n_sample {
                return Err(TreeError::LengthMismatch {
                    name: feat.name().to_string(),
                    expected: n_sample,
                    got: feat.len(),
                });
            }
            if let Feature::Numeric { name, vals } = feat {
                if let Some(row) = vals.iter().position(|v| v.is_nan()) {
                    return Err(TreeError::MissingValue {
                        line: row + 1,
                        column: name.clone(),
                    });
                }
            }
            let prev = name_to_index.insert(feat.name().to_string(), i);
            if prev.is_some() {
                return Err(TreeError::DuplicateColumn {
                    name: feat.name().to_string(),
                });
            }
        }

        let sample = Self {
            name_to_index,
            features,
            target_name: None,
            target: Vec::new(),
            n_sample,
        };
        Ok(sample)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    ///
    /// Numeric columns stay numeric, `Utf8` columns become categorical,
    /// and any other dtype is cast to `Utf8` first.
    /// Null cells are rejected.
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let features = data.get_columns()
            .iter()
            .map(feature_from_series)
            .collect::<Result<Vec<_>>>()?;

        let target_name = target.name().to_string();
        let labels = feature_from_series(&target)?.into_labels();

        let mut sample = Self::from_features(features)?;
        if sample.features.is_empty() {
            sample.n_sample = labels.len();
        }
        if labels.len() != sample.n_sample {
            return Err(TreeError::LengthMismatch {
                name: target_name,
                expected: sample.n_sample,
                got: labels.len(),
            });
        }
        sample.target = labels;
        sample.target_name = Some(target_name);
        Ok(sample)
    }


    /// Read a CSV format file to [`Sample`] type.
    /// This method returns `Err` if the file does not exist.
    ///
    /// If the CSV file does not have a header row,
    /// this method assigns a default name for each column:
    /// `Feat. [1]`, `Feat. [2]`, ..., `Feat. [n]`.
    ///
    /// **Do not forget** to call [`Sample::set_target`] to
    /// assign the class label.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header)
    }


    /// Read a CSV from any [`BufRead`].
    /// A column is numeric if every cell parses as `f64`,
    /// otherwise it is categorical.
    pub fn from_reader<R>(reader: R, has_header: bool) -> Result<Self>
        where R: BufRead,
    {
        Self::from_reader_with(
            reader, has_header, &HashSet::new(), &HashSet::new()
        )
    }


    /// Same as [`Sample::from_reader`], but the columns in `categorical`
    /// are never parsed as numbers and the columns in `ignored` are skipped.
    pub(super) fn from_reader_with<R>(
        reader: R,
        has_header: bool,
        categorical: &HashSet<String>,
        ignored: &HashSet<String>,
    ) -> Result<Self>
        where R: BufRead,
    {
        let mut lines = reader.lines().enumerate();

        let mut names: Option<Vec<String>> = None;
        if has_header {
            match lines.next() {
                Some((_, line)) => { names = Some(split_line(&line?)); },
                None => { return Err(TreeError::EmptySample); },
            }
        }

        let mut columns: Vec<Vec<String>> = Vec::new();
        for (i, line) in lines {
            let line = line?;
            let lineno = i + 1;
            if line.trim().is_empty() { continue; }

            let cells = split_line(&line);

            // If the header does not exist,
            // construct a dummy header.
            let names = names.get_or_insert_with(|| {
                (1..=cells.len())
                    .map(|k| format!("Feat. [{k}]"))
                    .collect()
            });

            if cells.len() != names.len() {
                return Err(TreeError::Parse {
                    line: lineno,
                    message: format!(
                        "expected {} cells, got {}",
                        names.len(),
                        cells.len(),
                    ),
                });
            }
            if columns.is_empty() {
                columns = vec![Vec::new(); names.len()];
            }

            for (k, cell) in cells.into_iter().enumerate() {
                if cell.is_empty() {
                    return Err(TreeError::MissingValue {
                        line: lineno,
                        column: names[k].clone(),
                    });
                }
                columns[k].push(cell);
            }
        }

        let names = names.unwrap_or_default();
        if columns.is_empty() {
            columns = vec![Vec::new(); names.len()];
        }

        for name in categorical.iter().chain(ignored) {
            if !names.contains(name) {
                return Err(TreeError::MissingFeature { name: name.clone() });
            }
        }

        let features = names.into_iter()
            .zip(columns)
            .filter(|(name, _)| !ignored.contains(name))
            .map(|(name, cells)| {
                let force = categorical.contains(&name);
                feature_from_cells(name, cells, force)
            })
            .collect::<Vec<_>>();

        Self::from_features(features)
    }


    /// Move the column named `target` into the target (class label).
    /// Numeric cells are converted into their textual form.
    /// A previously assigned target is dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| TreeError::MissingFeature {
                name: target.to_string(),
            })?;

        self.target = self.features.remove(pos).into_labels();
        self.target_name = Some(target.to_string());
        self.reindex();

        Ok(self)
    }


    /// Returns the slice of class labels.
    /// The slice is empty if no target is assigned.
    pub fn target(&self) -> &[String] {
        &self.target[..]
    }


    /// Returns the name of the target column, if any.
    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }


    /// Returns `true` if a target column covering every example is set.
    pub fn has_target(&self) -> bool {
        self.target_name.is_some() && self.target.len() == self.n_sample
    }


    /// Returns the distinct class labels in ascending order.
    pub fn unique_target(&self) -> Vec<&str> {
        self.target.iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }


    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature named `name`, if any.
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.name_to_index.get(name)
            .map(|&k| &self.features[k])
    }


    /// Returns the pair of the number of examples and
    /// the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.features.len())
    }


    /// Returns a view of the `row`-th example.
    pub fn row(&self, row: usize) -> Row<'_> {
        Row { sample: self, row }
    }


    /// Set the feature (column) names.
    /// Returns the old names.
    pub fn replace_names<S, T>(&mut self, names: T) -> Result<Vec<String>>
        where S: ToString,
              T: AsRef<[S]>,
    {
        let names = names.as_ref();

        let n_feature = self.features.len();
        if names.len() != n_feature {
            return Err(TreeError::LengthMismatch {
                name: "names".to_string(),
                expected: n_feature,
                got: names.len(),
            });
        }

        let names = names.iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        let mut seen = HashSet::with_capacity(n_feature);
        if let Some(name) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(TreeError::DuplicateColumn { name: name.clone() });
        }

        let old_names = names.into_iter()
            .zip(&mut self.features[..])
            .map(|(name, feature)| feature.replace_name(name))
            .collect();

        self.reindex();
        Ok(old_names)
    }


    /// Split `self` into two samples.
    /// `ix[start..end]` goes to the second (test) sample and
    /// every other entry of `ix` to the first (train) sample.
    ///
    /// # Panics
    /// Panics if `start > end`, if `end > ix.len()`,
    /// or if an entry of `ix` is not a row of `self`.
    pub fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Sample, Sample)
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();
        let test = &ix[start..end];
        let train = ix[..start].iter()
            .chain(&ix[end..])
            .copied()
            .collect::<Vec<_>>();

        (self.select(&train), self.select(test))
    }


    /// Shuffle the examples with the given `seed` and
    /// split them into a train sample holding `train_ratio` of them
    /// and a test sample holding the rest.
    pub fn shuffle_split(&self, train_ratio: f64, seed: u64)
        -> (Sample, Sample)
    {
        assert!(
            0f64 < train_ratio && train_ratio < 1f64,
            "Training ratio should be in `(0, 1)`. got {train_ratio}."
        );
        let mut ix = (0..self.n_sample).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        ix.shuffle(&mut rng);

        let train_size = (train_ratio * self.n_sample as f64) as usize;
        self.split(&ix, train_size, self.n_sample)
    }


    /// Returns a new sample made of the rows `ix`, in that order.
    pub(crate) fn select(&self, ix: &[usize]) -> Sample {
        let features = self.features.iter()
            .map(|feat| feat.select(ix))
            .collect::<Vec<_>>();
        let target = if self.has_target() {
            ix.iter().map(|&i| self.target[i].clone()).collect()
        } else {
            Vec::new()
        };

        Self {
            name_to_index: self.name_to_index.clone(),
            features,
            target_name: self.target_name.clone(),
            target,
            n_sample: ix.len(),
        }
    }


    fn reindex(&mut self) {
        self.name_to_index = self.features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect();
    }
}


/// Splits a CSV line on commas and trims each cell.
fn split_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().to_string())
        .collect()
}


/// Builds a column from raw CSV cells.
/// The column is numeric iff every cell parses as a non-`NaN` `f64`
/// and `force_categorical` is `false`.
fn feature_from_cells(
    name: String,
    cells: Vec<String>,
    force_categorical: bool,
) -> Feature
{
    if !force_categorical {
        let parsed = cells.iter()
            .map(|cell| cell.parse::<f64>().ok().filter(|v| !v.is_nan()))
            .collect::<Option<Vec<_>>>();
        if let Some(vals) = parsed {
            return Feature::Numeric { name, vals };
        }
    }
    Feature::Categorical { name, vals: cells }
}


fn feature_from_series(series: &Series) -> Result<Feature> {
    let name = series.name().to_string();
    let missing = || TreeError::MissingValue {
        line: 0,
        column: series.name().to_string(),
    };

    if series.dtype().is_numeric() {
        let cast = series.cast(&DataType::Float64)?;
        let vals = cast.f64()?
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(missing)?;
        return Ok(Feature::Numeric { name, vals });
    }

    let cast = series.cast(&DataType::Utf8)?;
    let vals = cast.utf8()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(missing)?;
    Ok(Feature::Categorical { name, vals })
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    /// Panics if the feature does not exist.
    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = self.name_to_index[name];
        &self.features[k]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn training_examples(bytes: &[u8], has_header: bool) -> Sample {
        Sample::from_reader(bytes, has_header)
            .unwrap()
            .set_target("class")
            .unwrap()
    }

    #[test]
    fn test_from_reader_01() {
        let bytes = b"\
            test,color,class\n\
            0.1,red,1.0\n\
            -8.0,blue,-1.0\n\
            3.0,red,1.0\n\
            -0.001,green,-1.0";
        let sample = training_examples(bytes, true);
        assert_eq!(sample.shape(), (4, 2));
        assert!(sample["test"].is_numeric());
        assert!(sample["color"].is_categorical());
        assert_eq!(sample.target(), &["1", "-1", "1", "-1"]);
        assert_eq!(sample.unique_target(), vec!["-1", "1"]);
    }

    #[test]
    fn test_from_reader_no_header() {
        let bytes = b"1.0,2.0\n3.0,4.0\n";
        let sample = Sample::from_reader(&bytes[..], false).unwrap();
        assert_eq!(sample.shape(), (2, 2));
        assert!(sample.feature("Feat. [1]").is_some());
        assert!(!sample.has_target());
    }

    #[test]
    fn test_from_reader_missing_value() {
        let bytes = b"a,b\n1.0,\n";
        let err = Sample::from_reader(&bytes[..], true).unwrap_err();
        assert!(
            matches!(err, TreeError::MissingValue { line: 2, .. }),
            "got {err:?}",
        );
    }

    #[test]
    fn test_from_reader_ragged_line() {
        let bytes = b"a,b\n1.0,2.0\n3.0\n";
        let err = Sample::from_reader(&bytes[..], true).unwrap_err();
        assert!(matches!(err, TreeError::Parse { line: 3, .. }), "got {err:?}");
    }

    #[test]
    fn test_set_target_missing() {
        let bytes = b"a,b\n1.0,2.0\n";
        let err = Sample::from_reader(&bytes[..], true)
            .unwrap()
            .set_target("class")
            .unwrap_err();
        assert!(matches!(err, TreeError::MissingFeature { .. }), "got {err:?}");
    }

    #[test]
    fn test_from_features_length_mismatch() {
        let err = Sample::from_features(vec![
            Feature::numeric_from("a", [1.0, 2.0]),
            Feature::numeric_from("b", [1.0]),
        ]).unwrap_err();
        assert!(matches!(err, TreeError::LengthMismatch { got: 1, .. }));
    }

    #[test]
    fn test_from_features_duplicate() {
        let err = Sample::from_features(vec![
            Feature::numeric_from("a", [1.0]),
            Feature::categorical_from("a", ["x"]),
        ]).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_from_features_nan() {
        let err = Sample::from_features(vec![
            Feature::numeric_from("a", [1.0, f64::NAN]),
        ]).unwrap_err();
        assert!(matches!(err, TreeError::MissingValue { line: 2, .. }));
    }

    #[test]
    fn test_split() {
        let bytes = b"x,class\n0,a\n1,b\n2,a\n3,b\n4,a\n";
        let sample = training_examples(bytes, true);
        let ix = [4, 3, 2, 1, 0];
        let (train, test) = sample.split(ix, 1, 3);
        assert_eq!(train.shape().0, 3);
        assert_eq!(test.shape().0, 2);
        assert_eq!(test.target(), &["b", "a"]);
        assert_eq!(train.target(), &["a", "b", "a"]);
    }

    #[test]
    fn test_shuffle_split_is_seeded() {
        let bytes = b"x,class\n0,a\n1,b\n2,a\n3,b\n4,a\n5,b\n6,a\n7,b\n8,a\n9,b\n";
        let sample = training_examples(bytes, true);
        let (train1, test1) = sample.shuffle_split(0.8, 7);
        let (train2, test2) = sample.shuffle_split(0.8, 7);
        assert_eq!(train1.shape().0, 8);
        assert_eq!(test1.shape().0, 2);
        assert_eq!(train1.target(), train2.target());
        assert_eq!(test1.features(), test2.features());
    }

    #[test]
    #[should_panic]
    fn test_split_out_of_range_panics() {
        let bytes = b"1.0,2.0\n3.0,4.0\n";
        let sample = Sample::from_reader(&bytes[..], false).unwrap();
        let _ = sample.split([0, 1], 1, 3);
    }

    #[test]
    fn test_replace_names() {
        let bytes = b"1.0,2.0\n3.0,4.0\n";
        let mut sample = Sample::from_reader(&bytes[..], false).unwrap();
        let old = sample.replace_names(["x", "y"]).unwrap();
        assert_eq!(old, vec!["Feat. [1]", "Feat. [2]"]);
        assert!(sample.feature("y").is_some());

        let err = sample.replace_names(["z", "z"]).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateColumn { ref name } if name == "z"));

        // A rejected rename leaves the sample untouched.
        let names = sample.features().iter().map(Feature::name).collect::<Vec<_>>();
        assert_eq!(names, ["x", "y"]);
        assert!(sample.feature("x").is_some());
        assert!(sample.feature("z").is_none());
    }

    #[test]
    fn test_from_dataframe() {
        let s1 = Series::new("x", &[10.0, 14.0, 15.0]);
        let s2 = Series::new("color", &["red", "blue", "red"]);
        let df = DataFrame::new(vec![s1, s2]).unwrap();
        let target = Series::new("class", &[1_i64, -1, 1]);

        let sample = Sample::from_dataframe(df, target).unwrap();
        assert_eq!(sample.shape(), (3, 2));
        assert!(sample["x"].is_numeric());
        assert!(sample["color"].is_categorical());
        assert_eq!(sample.target_name(), Some("class"));
        assert_eq!(sample.target(), &["1", "-1", "1"]);
    }
}
