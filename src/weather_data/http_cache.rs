use crate::weather_data::error::WeatherDataError;
use bincode::config::{Configuration, Fixint, LittleEndian};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CACHE_FILE_NAME: &str = "http_cache.bin";
const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// A successful archive response as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub url: String,
    pub body: String,
    pub cached_at: DateTime<Utc>,
}

/// On-disk store of archive responses keyed by request signature.
///
/// Entries never expire; only [`CacheStore::clear`] removes them. The whole index
/// lives in a single bincode file that is rewritten on every insert.
#[derive(Debug)]
pub struct CacheStore {
    cache_file: PathBuf,
    entries: HashMap<String, CachedResponse>,
}

impl CacheStore {
    /// Opens the store in `cache_dir`, creating the directory if needed. A missing
    /// index file means an empty cache.
    pub async fn open(cache_dir: &Path) -> Result<Self, WeatherDataError> {
        tokio::fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| WeatherDataError::CacheDirCreation(cache_dir.to_path_buf(), e))?;
        let cache_file = cache_dir.join(CACHE_FILE_NAME);

        let entries = if tokio::fs::try_exists(&cache_file).await.unwrap_or(false) {
            let path_clone = cache_file.clone();
            tokio::task::spawn_blocking(move || Self::read_entries(&path_clone)).await??
        } else {
            HashMap::new()
        };
        info!(
            "Opened HTTP cache {} with {} entries",
            cache_file.display(),
            entries.len()
        );

        Ok(Self {
            cache_file,
            entries,
        })
    }

    pub fn get(&self, signature: &str) -> Option<&CachedResponse> {
        self.entries.get(signature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores `body` under `signature` and persists the index.
    pub async fn insert(&mut self, signature: &str, body: String) -> Result<(), WeatherDataError> {
        self.entries.insert(
            signature.to_string(),
            CachedResponse {
                url: signature.to_string(),
                body,
                cached_at: Utc::now(),
            },
        );
        self.persist().await
    }

    /// Drops every entry, in memory and on disk.
    pub async fn clear(&mut self) -> Result<(), WeatherDataError> {
        self.entries.clear();
        match tokio::fs::remove_file(&self.cache_file).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WeatherDataError::CacheDeletion(self.cache_file.clone(), e)),
        }
    }

    fn read_entries(cache_file: &Path) -> Result<HashMap<String, CachedResponse>, WeatherDataError> {
        let bytes = std::fs::read(cache_file)
            .map_err(|e| WeatherDataError::CacheRead(cache_file.to_path_buf(), e))?;
        let (entries, _) = bincode::serde::decode_from_slice::<HashMap<String, CachedResponse>, _>(
            &bytes,
            BINCODE_CONFIG,
        )
        .map_err(|e| WeatherDataError::CacheDecode(cache_file.to_path_buf(), Box::new(e)))?;
        Ok(entries)
    }

    async fn persist(&self) -> Result<(), WeatherDataError> {
        let entries = self.entries.clone();
        let cache_file = self.cache_file.clone();
        tokio::task::spawn_blocking(move || {
            let bytes = bincode::serde::encode_to_vec(&entries, BINCODE_CONFIG)
                .map_err(|e| WeatherDataError::CacheEncode(Box::new(e)))?;
            let dir = cache_file.parent().unwrap_or_else(|| Path::new("."));

            // Write next to the index and rename, so a crash never leaves a torn file.
            let mut temp_file = NamedTempFile::new_in(dir)
                .map_err(|e| WeatherDataError::CacheWrite(cache_file.clone(), e))?;
            temp_file
                .write_all(&bytes)
                .map_err(|e| WeatherDataError::CacheWrite(cache_file.clone(), e))?;
            temp_file
                .persist(&cache_file)
                .map_err(|e| WeatherDataError::CacheWrite(cache_file.clone(), e.error))?;
            debug!(
                "Wrote {} bytes of cache index to {}",
                bytes.len(),
                cache_file.display()
            );
            Ok::<(), WeatherDataError>(())
        })
        .await??;
        Ok(())
    }
}
