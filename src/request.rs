//! Builds the per-station archive requests from one shared parameter template.

use crate::types::hourly_variable::{HourlyVariable, TimezoneMode, WindSpeedUnit};
use crate::types::station::Station;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters shared by every station's request.
///
/// A template is never handed to the fetch client directly. Call
/// [`RequestTemplate::for_station`] to get a fresh [`RequestParameters`] with the
/// station's coordinates filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTemplate {
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
    /// Requested hourly variables. This order is the column order of the output.
    pub variables: Vec<HourlyVariable>,
    pub wind_speed_unit: WindSpeedUnit,
    pub timezone: TimezoneMode,
}

impl RequestTemplate {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, variables: Vec<HourlyVariable>) -> Self {
        Self {
            start_date,
            end_date,
            variables,
            wind_speed_unit: WindSpeedUnit::MetresPerSecond,
            timezone: TimezoneMode::Auto,
        }
    }

    /// Creates the request for a single station.
    ///
    /// Every field is copied from the template and only the coordinates are taken
    /// from `station`. The returned value owns its data, so changing it never
    /// affects the template or another station's request.
    pub fn for_station(&self, station: &Station) -> RequestParameters {
        RequestParameters {
            start_date: self.start_date,
            end_date: self.end_date,
            variables: self.variables.clone(),
            wind_speed_unit: self.wind_speed_unit,
            timezone: self.timezone.clone(),
            latitude: station.latitude(),
            longitude: station.longitude(),
        }
    }
}

/// The 2023-04-01 to 2024-04-01 range with all seven variables, wind speed in m/s
/// and the timezone resolved by the service.
impl Default for RequestTemplate {
    fn default() -> Self {
        // Both dates are valid calendar days.
        let start_date = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap_or_default();
        let end_date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap_or_default();
        Self::new(start_date, end_date, HourlyVariable::ALL.to_vec())
    }
}

/// A fully specified request for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParameters {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub variables: Vec<HourlyVariable>,
    pub wind_speed_unit: WindSpeedUnit,
    pub timezone: TimezoneMode,
    pub latitude: f64,
    pub longitude: f64,
}

impl RequestParameters {
    /// Renders the outbound query string parameters, in a fixed order so identical
    /// requests always produce the same cache signature.
    ///
    /// `timeformat=unixtime` makes the service return the time axis as UTC epoch
    /// seconds.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let hourly = self
            .variables
            .iter()
            .map(HourlyVariable::api_name)
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("start_date", self.start_date.format(DATE_FORMAT).to_string()),
            ("end_date", self.end_date.format(DATE_FORMAT).to_string()),
            ("hourly", hourly),
            ("wind_speed_unit", self.wind_speed_unit.query_value().to_string()),
            ("timezone", self.timezone.query_value().to_string()),
            ("timeformat", "unixtime".to_string()),
        ]
    }
}
