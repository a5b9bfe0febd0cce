use crate::types::hourly_variable::HourlyVariable;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode cache data from '{0}'")]
    CacheDecode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to encode cache data")]
    CacheEncode(#[source] Box<bincode::error::EncodeError>),

    #[error("Failed to delete cache '{0}'")]
    CacheDeletion(PathBuf, #[source] std::io::Error),

    #[error("Invalid request URL '{0}'")]
    InvalidUrl(String, #[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}: {reason}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("Giving up on {url} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<WeatherDataError>,
    },

    #[error("Failed to parse archive response for {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Archive response is missing requested variable '{0}'")]
    MissingVariable(HourlyVariable),

    #[error("Response slot {slot} holds '{found}' but '{expected}' was requested there")]
    VariableOrderMismatch {
        slot: usize,
        expected: HourlyVariable,
        found: HourlyVariable,
    },

    #[error("Response has {found} series but {expected} variables were requested")]
    VariableCountMismatch { expected: usize, found: usize },

    #[error("Variable '{variable}' has {found} values but the time axis has {expected} steps")]
    SeriesLengthMismatch {
        variable: HourlyVariable,
        expected: usize,
        found: usize,
    },

    #[error("Sampling interval must be positive, got {0} seconds")]
    InvalidInterval(i64),

    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("Failed building the hourly table: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to write CSV file '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing CSV file '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
