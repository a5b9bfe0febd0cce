use crate::types::hourly_frame::{HourlyFrame, COL_DATE};
use crate::types::hourly_response::HourlyResponse;
use crate::types::hourly_variable::HourlyVariable;
use crate::weather_data::error::WeatherDataError;
use polars::prelude::*;

/// Regular time axis `[start, end)` stepped by `interval` seconds.
pub fn time_axis(start: i64, end: i64, interval: i64) -> Result<Vec<i64>, WeatherDataError> {
    if interval <= 0 {
        return Err(WeatherDataError::InvalidInterval(interval));
    }
    let step = usize::try_from(interval).map_err(|_| WeatherDataError::InvalidInterval(interval))?;
    Ok((start..end).step_by(step).collect())
}

/// Turns a response into a table with a `date` column followed by one column per
/// requested variable, in request order.
///
/// Response slot `i` must carry `variables[i]`, and every series must be exactly
/// as long as the time axis; anything else is rejected instead of producing rows
/// with values shifted against the wrong timestamps.
pub fn extract(
    response: &HourlyResponse,
    variables: &[HourlyVariable],
) -> Result<HourlyFrame, WeatherDataError> {
    let timestamps = time_axis(response.time, response.time_end, response.interval)?;
    let expected_len = timestamps.len();

    if response.variables.len() != variables.len() {
        return Err(WeatherDataError::VariableCountMismatch {
            expected: variables.len(),
            found: response.variables.len(),
        });
    }

    let millis = timestamps
        .iter()
        .map(|&seconds| {
            seconds
                .checked_mul(1000)
                .ok_or(WeatherDataError::TimestampOutOfRange(seconds))
        })
        .collect::<Result<Vec<i64>, _>>()?;
    let date = Series::new(COL_DATE.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    let mut columns: Vec<Column> = Vec::with_capacity(variables.len() + 1);
    columns.push(date.into());

    for (slot, (&requested, series)) in variables.iter().zip(&response.variables).enumerate() {
        if series.variable != requested {
            return Err(WeatherDataError::VariableOrderMismatch {
                slot,
                expected: requested,
                found: series.variable,
            });
        }
        if series.values.len() != expected_len {
            return Err(WeatherDataError::SeriesLengthMismatch {
                variable: requested,
                expected: expected_len,
                found: series.values.len(),
            });
        }
        columns.push(Series::new(requested.api_name().into(), series.values.as_slice()).into());
    }

    Ok(HourlyFrame::new(DataFrame::new(columns)?))
}
