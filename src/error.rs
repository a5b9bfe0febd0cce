use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error("Processing station '{station}' failed")]
    Station {
        station: String,
        #[source]
        source: WeatherDataError,
    },
}
