//! Defines the hourly variables that can be requested from the archive and the
//! query options that travel alongside them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named physical quantity sampled once per hour by the archive service.
///
/// The order variables are requested in is the order their columns appear in the
/// output table, so lists of `HourlyVariable` are always kept ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HourlyVariable {
    /// Air temperature 2 metres above ground, °C.
    Temperature2m,
    /// Relative humidity 2 metres above ground, %.
    RelativeHumidity2m,
    /// Total precipitation (rain, showers, snow) of the preceding hour, mm.
    Precipitation,
    /// Atmospheric pressure reduced to mean sea level, hPa.
    PressureMsl,
    /// Wind speed 10 metres above ground, in the requested [`WindSpeedUnit`].
    WindSpeed10m,
    /// Wind direction 10 metres above ground, degrees.
    WindDirection10m,
    /// Total cloud cover as an area fraction, %.
    CloudCover,
}

impl HourlyVariable {
    /// Every variable in the order the station tables carry them.
    pub const ALL: [HourlyVariable; 7] = [
        HourlyVariable::Temperature2m,
        HourlyVariable::RelativeHumidity2m,
        HourlyVariable::Precipitation,
        HourlyVariable::PressureMsl,
        HourlyVariable::WindSpeed10m,
        HourlyVariable::WindDirection10m,
        HourlyVariable::CloudCover,
    ];

    /// Name used both as the API parameter value and as the output column header.
    pub fn api_name(&self) -> &'static str {
        match self {
            HourlyVariable::Temperature2m => "temperature_2m",
            HourlyVariable::RelativeHumidity2m => "relative_humidity_2m",
            HourlyVariable::Precipitation => "precipitation",
            HourlyVariable::PressureMsl => "pressure_msl",
            HourlyVariable::WindSpeed10m => "wind_speed_10m",
            HourlyVariable::WindDirection10m => "wind_direction_10m",
            HourlyVariable::CloudCover => "cloud_cover",
        }
    }
}

/// Allows formatting a `HourlyVariable` using its `api_name`.
///
/// # Examples
///
/// ```
/// use meteo_archive::HourlyVariable;
///
/// assert_eq!(HourlyVariable::PressureMsl.to_string(), "pressure_msl");
/// ```
impl fmt::Display for HourlyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Unit the service reports wind speeds in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindSpeedUnit {
    KilometresPerHour,
    MetresPerSecond,
    MilesPerHour,
    Knots,
}

impl WindSpeedUnit {
    pub(crate) fn query_value(&self) -> &'static str {
        match self {
            WindSpeedUnit::KilometresPerHour => "kmh",
            WindSpeedUnit::MetresPerSecond => "ms",
            WindSpeedUnit::MilesPerHour => "mph",
            WindSpeedUnit::Knots => "kn",
        }
    }
}

/// How the service resolves the timezone of the returned series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimezoneMode {
    /// Let the service pick the local timezone of the coordinate.
    Auto,
    /// Always UTC.
    Gmt,
    /// An explicit IANA timezone name, e.g. "Asia/Almaty".
    Named(String),
}

impl TimezoneMode {
    pub(crate) fn query_value(&self) -> &str {
        match self {
            TimezoneMode::Auto => "auto",
            TimezoneMode::Gmt => "GMT",
            TimezoneMode::Named(name) => name,
        }
    }
}
