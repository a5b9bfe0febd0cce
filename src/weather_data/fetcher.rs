use crate::request::RequestParameters;
use crate::types::hourly_response::{ArchiveErrorBody, HourlyResponse};
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::http_cache::CacheStore;
use crate::weather_data::retry::{with_retry, RetryError, RetryPolicy};
use bon::Builder;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode, Url};
use std::path::PathBuf;
use std::time::Duration;

/// Historical weather endpoint of Open-Meteo.
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Settings for the caching, retrying transport.
///
/// # Examples
///
/// ```
/// use meteo_archive::ClientConfig;
///
/// let config = ClientConfig::builder().cache_folder(".weather-cache".into()).build();
/// assert_eq!(config.max_retries, 5);
/// assert_eq!(config.backoff_factor, 0.2);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    /// Endpoint the pipeline sends its requests to.
    #[builder(default = ARCHIVE_URL.to_string())]
    pub archive_url: String,
    /// Directory holding the response cache.
    #[builder(default = PathBuf::from(".cache"))]
    pub cache_folder: PathBuf,
    #[builder(default = 5)]
    pub max_retries: u32,
    #[builder(default = 0.2)]
    pub backoff_factor: f64,
    /// Per-request timeout. `None` keeps reqwest's default of no timeout.
    pub timeout: Option<Duration>,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    #[builder(default = true)]
    pub use_system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Sends archive requests through the response cache and the retry policy.
pub struct ArchiveClient {
    http: Client,
    cache: CacheStore,
    retry_policy: RetryPolicy,
}

impl ArchiveClient {
    pub async fn new(config: &ClientConfig) -> Result<Self, WeatherDataError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| WeatherDataError::NetworkRequest(ARCHIVE_URL.to_string(), e))?;

        Ok(Self {
            http,
            cache: CacheStore::open(&config.cache_folder).await?,
            retry_policy: RetryPolicy {
                max_retries: config.max_retries,
                backoff_factor: config.backoff_factor,
            },
        })
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut CacheStore {
        &mut self.cache
    }

    /// Fetches the hourly series for the single location in `params`.
    ///
    /// Identical requests are answered from the cache without touching the network.
    /// Otherwise the request is sent, retried on transient failures, and a
    /// successful body is cached before decoding.
    pub async fn fetch(
        &mut self,
        url: &str,
        params: &RequestParameters,
    ) -> Result<HourlyResponse, WeatherDataError> {
        let request_url = self.request_url(url, params)?;
        let signature = request_url.to_string();
        debug!("Request signature: {}", signature);

        let cached = self
            .cache
            .get(&signature)
            .map(|entry| (entry.body.clone(), entry.cached_at));

        let body = match cached {
            Some((body, cached_at)) => {
                info!("Cache hit for {} (stored {})", signature, cached_at);
                body
            }
            None => {
                warn!("Cache miss for {}. Downloading.", signature);
                let body = self.download(&request_url).await?;
                self.cache.insert(&signature, body.clone()).await?;
                body
            }
        };

        HourlyResponse::from_archive_json(&signature, &body, &params.variables)
    }

    fn request_url(&self, url: &str, params: &RequestParameters) -> Result<Url, WeatherDataError> {
        let request = self
            .http
            .get(url)
            .query(&params.query_pairs())
            .build()
            .map_err(|e| WeatherDataError::InvalidUrl(url.to_string(), e))?;
        Ok(request.url().clone())
    }

    async fn download(&self, url: &Url) -> Result<String, WeatherDataError> {
        let url_str = url.as_str();
        info!("Downloading data from {}", url_str);

        let http = &self.http;
        let body = with_retry(url_str, &self.retry_policy, || async move {
            let response = http.get(url.clone()).send().await.map_err(|e| {
                let retryable = e.is_connect() || e.is_timeout() || e.is_request();
                let err = WeatherDataError::NetworkRequest(url_str.to_string(), e);
                if retryable {
                    RetryError::Retryable(err)
                } else {
                    RetryError::NonRetryable(err)
                }
            })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| RetryError::Retryable(WeatherDataError::NetworkRequest(url_str.to_string(), e)))?;

            if status.is_success() {
                return Ok(text);
            }

            warn!("HTTP error {} for {}", status, url_str);
            let err = WeatherDataError::HttpStatus {
                url: url_str.to_string(),
                status,
                reason: error_reason(&text),
            };
            if is_retryable_status(status) {
                Err(RetryError::Retryable(err))
            } else {
                Err(RetryError::NonRetryable(err))
            }
        })
        .await?;

        info!("Downloaded {} bytes from {}", body.len(), url_str);
        Ok(body)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Pulls the service's `reason` out of an error body, falling back to the raw text.
fn error_reason(body: &str) -> String {
    serde_json::from_str::<ArchiveErrorBody>(body)
        .map(|error| error.reason)
        .unwrap_or_else(|_| body.trim().to_string())
}
