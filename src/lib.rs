mod archive;
mod error;
mod request;
mod stations;
mod types;
mod weather_data;

pub use archive::MeteoArchive;
pub use error::ArchiveError;
pub use request::{RequestParameters, RequestTemplate};
pub use stations::registry::StationRegistry;

pub use types::hourly_frame::{HourlyFrame, COL_DATE};
pub use types::hourly_response::{HourlyResponse, VariableSeries};
pub use types::hourly_variable::{HourlyVariable, TimezoneMode, WindSpeedUnit};
pub use types::station::{LatLon, Station};

pub use weather_data::error::WeatherDataError;
pub use weather_data::extractor::{extract, time_axis};
pub use weather_data::fetcher::{ArchiveClient, ClientConfig, ARCHIVE_URL};
pub use weather_data::http_cache::{CacheStore, CachedResponse};
pub use weather_data::retry::{with_retry, RetryError, RetryPolicy};
pub use weather_data::writer::write_csv;
