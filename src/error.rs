use thiserror::Error;

use crate::package::Ecosystem;

/// Failure of a single HTTP request, distinct from a non-success status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl TransportError {
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(url.to_string())
        } else {
            TransportError::Request {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            TransportError::Timeout(url) => url,
            TransportError::Request { url, .. } => url,
        }
    }
}

/// Fatal errors of a resolution. Everything else degrades to an absent value.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("No registry configured for {0}")]
    Unsupported(Ecosystem),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Package name must not be empty")]
    EmptyName,

    #[error("Package version must not be empty")]
    EmptyVersion,

    #[error("{0} packages require a namespace")]
    MissingNamespace(Ecosystem),

    #[error("Unsupported package type: {0}")]
    UnsupportedType(String),

    #[error("Malformed package URL: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
