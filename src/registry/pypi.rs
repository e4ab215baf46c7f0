//! PyPI registry client for fetching Python package metadata

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::DEFAULT_PYPI_URL;
use crate::error::RegistryError;
use crate::http::HttpGet;
use crate::package::{Ecosystem, PackageIdentifier};
use crate::registry::{Registry, RegistryMetadata, fetch_json};

/// PyPI registry client
pub struct PypiRegistry {
    http: Arc<dyn HttpGet>,
    base_url: String,
}

impl PypiRegistry {
    pub fn new(http: Arc<dyn HttpGet>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_default_url(http: Arc<dyn HttpGet>) -> Self {
        Self::new(http, DEFAULT_PYPI_URL)
    }
}

#[async_trait]
impl Registry for PypiRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pypi
    }

    async fn resolve_latest(&self, package: &PackageIdentifier) -> Result<String, RegistryError> {
        let url = format!("{}/pypi/{}/json", self.base_url, package.name());
        debug!("Fetching PyPI package: {}", url);

        let document = fetch_json(self.http.as_ref(), &url, package).await?;

        document
            .pointer("/info/version")
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                RegistryError::Parse(format!("PyPI lists no version for {}", package.name()))
            })
    }

    async fn fetch_metadata(
        &self,
        package: &PackageIdentifier,
    ) -> Result<RegistryMetadata, RegistryError> {
        let url = format!(
            "{}/pypi/{}/{}/json",
            self.base_url,
            package.name(),
            package.version()
        );
        debug!("Fetching PyPI release: {}", url);

        let document = fetch_json(self.http.as_ref(), &url, package).await?;

        Ok(RegistryMetadata::new(url, document))
    }
}
