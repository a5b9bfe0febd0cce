//! This module provides the main entry point: a handle that owns the caching,
//! retrying archive client and runs the station pipeline with it.

use crate::error::ArchiveError;
use crate::request::RequestTemplate;
use crate::stations::registry::StationRegistry;
use crate::types::station::Station;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::extractor::extract;
use crate::weather_data::fetcher::{ArchiveClient, ClientConfig};
use crate::weather_data::writer::write_csv;
use bon::bon;
use log::info;
use std::path::{Path, PathBuf};

/// Downloads hourly history for a list of stations and writes one CSV per station.
///
/// Create an instance using [`MeteoArchive::new()`] for the default configuration
/// (cache in `./.cache`, 5 retries, 0.2s backoff) or
/// [`MeteoArchive::with_config()`] for anything else.
///
/// # Examples
///
/// ```no_run
/// # use meteo_archive::{MeteoArchive, ArchiveError};
/// # async fn run() -> Result<(), ArchiveError> {
/// let mut archive = MeteoArchive::new().await?;
/// // Default stations and date range, files written to the working directory.
/// let written = archive.run().call().await?;
/// println!("{} files written", written.len());
/// # Ok(())
/// # }
/// ```
pub struct MeteoArchive {
    client: ArchiveClient,
    archive_url: String,
}

#[bon]
impl MeteoArchive {
    /// Creates an archive handle using [`ClientConfig::default()`].
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::WeatherData`] if the cache directory cannot be created
    /// or the existing cache index cannot be read.
    pub async fn new() -> Result<Self, ArchiveError> {
        Self::with_config(ClientConfig::default()).await
    }

    /// Creates an archive handle with an explicit transport configuration.
    pub async fn with_config(config: ClientConfig) -> Result<Self, ArchiveError> {
        Ok(Self {
            client: ArchiveClient::new(&config).await?,
            archive_url: config.archive_url,
        })
    }

    /// Gives access to the underlying client, e.g. to clear its cache.
    pub fn client_mut(&mut self) -> &mut ArchiveClient {
        &mut self.client
    }

    /// Runs the pipeline for every station, strictly in registry order.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.stations(StationRegistry)`: Optional. Defaults to [`StationRegistry::default()`].
    /// * `.template(RequestTemplate)`: Optional. Defaults to [`RequestTemplate::default()`].
    /// * `.output_dir(PathBuf)`: Optional. Directory the CSV files go to. Defaults to
    ///   the working directory.
    ///
    /// # Returns
    ///
    /// Paths of the written files, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Station`] for the first station that fails. Files of
    /// earlier stations stay on disk; later stations are not attempted.
    #[builder]
    pub async fn run(
        &mut self,
        #[builder(default)] stations: StationRegistry,
        #[builder(default)] template: RequestTemplate,
        #[builder(default = PathBuf::from("."))] output_dir: PathBuf,
    ) -> Result<Vec<PathBuf>, ArchiveError> {
        let mut written = Vec::with_capacity(stations.len());
        for station in stations.iter() {
            let path = self
                .process_station(station, &template, &output_dir)
                .await
                .map_err(|e| ArchiveError::Station {
                    station: station.id.clone(),
                    source: e,
                })?;
            written.push(path);
        }
        Ok(written)
    }

    /// Fetches, reshapes and writes a single station's table.
    pub async fn process_station(
        &mut self,
        station: &Station,
        template: &RequestTemplate,
        output_dir: &Path,
    ) -> Result<PathBuf, WeatherDataError> {
        println!(
            "Fetching data for station {} ({}, {})...",
            station.id,
            station.latitude(),
            station.longitude()
        );

        let params = template.for_station(station);
        let response = self.client.fetch(&self.archive_url, &params).await?;
        info!(
            "Station {}: timezone {} (UTC offset {}s), {} series",
            station.id,
            response.timezone.as_deref().unwrap_or("unknown"),
            response.utc_offset_seconds,
            response.variables.len()
        );

        let mut table = extract(&response, &params.variables)?;
        let file_name = station.csv_file_name();
        let path = output_dir.join(&file_name);
        write_csv(&mut table, &path)?;

        println!("File {} saved.", file_name);
        Ok(path)
    }
}
