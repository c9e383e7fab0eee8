use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or reshaping the data documents.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON in {document}: {source}")]
    Json {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unrecognised date: {0}")]
    Date(String),

    #[error("Inconsistent data shape: {0}")]
    Shape(String),
}

impl DataError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => matches!(source.kind(), std::io::ErrorKind::NotFound),
            Self::Http { source, .. } => matches!(
                source.status(),
                Some(status) if status == reqwest::StatusCode::NOT_FOUND
            ),
            _ => false,
        }
    }
}
