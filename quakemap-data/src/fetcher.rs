use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::error::QuakeDataError;

#[cfg(feature = "http-request")]
use crate::reqwest_fetcher::ReqwestFetcher;

/// Retrieves a GeoJSON document from a source location.
///
/// Implementations perform a single attempt; retries and timeouts belong to the transport.
#[async_trait]
pub trait GeoJsonFetcher: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<Value, QuakeDataError>;
}

/// Reads GeoJSON documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

#[async_trait]
impl GeoJsonFetcher for FileFetcher {
    async fn fetch(&self, source: &str) -> Result<Value, QuakeDataError> {
        debug!("Reading GeoJSON from {source}");
        let text = tokio::fs::read_to_string(source)
            .await
            .map_err(|err| QuakeDataError::Io {
                path: PathBuf::from(source),
                source: err,
            })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Dispatches `http://` and `https://` sources to a network fetcher and everything else to
/// the filesystem
#[derive(Clone)]
pub struct SourceFetcher {
    http: Option<Arc<dyn GeoJsonFetcher>>,
    files: FileFetcher,
}

impl SourceFetcher {
    pub fn new(http: Option<Arc<dyn GeoJsonFetcher>>) -> Self {
        Self {
            http,
            files: FileFetcher,
        }
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[async_trait]
impl GeoJsonFetcher for SourceFetcher {
    async fn fetch(&self, source: &str) -> Result<Value, QuakeDataError> {
        if is_remote(source) {
            match &self.http {
                Some(http) => http.fetch(source).await,
                None => Err(QuakeDataError::NoFetcherConfigured(format!(
                    "Fetching {source} requires the http-request feature flag"
                ))),
            }
        } else {
            self.files.fetch(source).await
        }
    }
}

pub fn make_fetcher() -> Result<Arc<dyn GeoJsonFetcher>, QuakeDataError> {
    #[cfg(feature = "http-request")]
    let http: Option<Arc<dyn GeoJsonFetcher>> = Some(Arc::new(ReqwestFetcher::try_new()?));

    #[cfg(not(feature = "http-request"))]
    let http: Option<Arc<dyn GeoJsonFetcher>> = None;

    Ok(Arc::new(SourceFetcher::new(http)))
}
