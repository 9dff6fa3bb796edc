use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, TreeError};
use super::sample_struct::Sample;


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV format file to [`Sample`].
/// Other formats are not supported yet.
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use cartree::SampleReader;
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::default()
///     .file(filename)
///     .has_header(true)
///     .ignore(["day"])
///     .target_feature("play")
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    categorical: HashSet<String>,
    ignored: HashSet<String>,
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
            categorical: HashSet::new(),
            ignored: HashSet::new(),
        }
    }
}


impl<P, S> SampleReader<P, S> {
    /// Construct a new instance of [`SampleReader`].
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Treat the given columns as categorical even if
    /// every cell of them parses as a number (e.g. zip codes).
    pub fn categorical<I, T>(mut self, columns: I) -> Self
        where I: IntoIterator<Item = T>,
              T: ToString,
    {
        self.categorical.extend(columns.into_iter().map(|c| c.to_string()));
        self
    }


    /// Skip the given columns (e.g. row identifiers).
    pub fn ignore<I, T>(mut self, columns: I) -> Self
        where I: IntoIterator<Item = T>,
              T: ToString,
    {
        self.ignored.extend(columns.into_iter().map(|c| c.to_string()));
        self
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for target label.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments
    /// and returns the [`Sample`].
    /// This method consumes `self.`
    ///
    /// A target column is optional, so that the same reader
    /// serves both training and prediction files.
    pub fn read(self) -> Result<Sample> {
        let file = self.file.ok_or_else(|| TreeError::Io(
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "The file name for csv is not set",
            )
        ))?;
        let reader = BufReader::new(File::open(file.as_ref())?);

        let sample = Sample::from_reader_with(
            reader, self.has_header, &self.categorical, &self.ignored,
        )?;

        match self.target {
            Some(target) => sample.set_target(target.as_ref()),
            None => Ok(sample),
        }
    }
}
