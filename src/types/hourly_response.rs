//! The hourly block of an archive response, reshaped into a regular time axis plus
//! one tagged value series per requested variable.

use crate::types::hourly_variable::HourlyVariable;
use crate::weather_data::error::WeatherDataError;
use serde::Deserialize;
use std::collections::HashMap;

/// Interval assumed when the service returns fewer than two timestamps.
const DEFAULT_INTERVAL_SECONDS: i64 = 3600;

/// Values of one variable, tagged with the variable they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSeries {
    pub variable: HourlyVariable,
    /// Raw values, `None` where the archive has no observation.
    pub values: Vec<Option<f32>>,
}

/// Hourly series for a single location.
///
/// The time axis is described by `time` (inclusive), `time_end` (exclusive) and
/// `interval`, all in UTC epoch seconds. `variables` is ordered like the request's
/// variable list.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyResponse {
    pub time: i64,
    pub time_end: i64,
    pub interval: i64,
    pub variables: Vec<VariableSeries>,
    /// Timezone the service resolved for the coordinate, e.g. "Asia/Almaty".
    pub timezone: Option<String>,
    pub utc_offset_seconds: i32,
}

#[derive(Debug, Deserialize)]
struct ArchiveBody {
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    utc_offset_seconds: i32,
    hourly: HourlyBody,
}

#[derive(Debug, Deserialize)]
struct HourlyBody {
    time: Vec<i64>,
    #[serde(flatten)]
    series: HashMap<String, Vec<Option<f32>>>,
}

/// Error body the service sends along with a 4xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveErrorBody {
    pub reason: String,
}

impl HourlyResponse {
    /// Decodes a JSON archive body requested with `timeformat=unixtime`.
    ///
    /// The JSON body is keyed by variable name; the series are pulled out in the
    /// order of `variables`, so slot `i` always holds `variables[i]`.
    pub fn from_archive_json(
        url: &str,
        body: &str,
        variables: &[HourlyVariable],
    ) -> Result<Self, WeatherDataError> {
        let parsed: ArchiveBody =
            serde_json::from_str(body).map_err(|e| WeatherDataError::JsonParse {
                url: url.to_string(),
                source: e,
            })?;
        let mut hourly = parsed.hourly;

        let series = variables
            .iter()
            .map(|&variable| {
                hourly
                    .series
                    .remove(variable.api_name())
                    .map(|values| VariableSeries { variable, values })
                    .ok_or(WeatherDataError::MissingVariable(variable))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let interval = match hourly.time.as_slice() {
            [first, second, ..] => second - first,
            _ => DEFAULT_INTERVAL_SECONDS,
        };
        let (time, time_end) = match (hourly.time.first(), hourly.time.last()) {
            (Some(&first), Some(&last)) => (first, last + interval),
            _ => (0, 0),
        };

        Ok(Self {
            time,
            time_end,
            interval,
            variables: series,
            timezone: parsed.timezone,
            utc_offset_seconds: parsed.utc_offset_seconds,
        })
    }
}
