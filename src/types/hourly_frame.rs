//! Contains the `HourlyFrame` structure holding one station's hourly table.

use polars::prelude::DataFrame;

/// Name of the timestamp column.
pub const COL_DATE: &str = "date";

/// A wrapper around a Polars `DataFrame` holding one station's hourly table.
///
/// The first column is `date`, a timezone-naive `Datetime` in milliseconds whose
/// values are UTC instants. It is followed by one `Float32` column per requested
/// variable, named after the variable (see [`crate::HourlyVariable::api_name`]),
/// in request order. All columns have the same length.
///
/// Instances are produced by [`crate::extract`].
#[derive(Debug, Clone)]
pub struct HourlyFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl HourlyFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Number of hourly rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Column names in output order, `date` first.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}
