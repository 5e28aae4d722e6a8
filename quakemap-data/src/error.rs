use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum QuakeDataError {
    #[error("Fetching is not enabled: {0}")]
    NoFetcherConfigured(String),

    #[error("Request for {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[cfg(feature = "reqwest")]
    #[error("http error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a FeatureCollection, found {0}")]
    NotFeatureCollection(String),
}
