//! npm registry API implementation

use std::sync::Arc;

use tracing::debug;

use crate::config::DEFAULT_NPM_URL;
use crate::error::RegistryError;
use crate::http::HttpGet;
use crate::package::{Ecosystem, PackageIdentifier};
use crate::registry::{Registry, RegistryMetadata, fetch_json};

/// Registry implementation for npm registry API
pub struct NpmRegistry {
    http: Arc<dyn HttpGet>,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL
    pub fn new(http: Arc<dyn HttpGet>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_default_url(http: Arc<dyn HttpGet>) -> Self {
        Self::new(http, DEFAULT_NPM_URL)
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    async fn resolve_latest(&self, package: &PackageIdentifier) -> Result<String, RegistryError> {
        let encoded_name = Self::encode_package_name(&package.registry_name());
        let url = format!("{}/{}", self.base_url, encoded_name);
        debug!("Fetching npm packument: {}", url);

        let document = fetch_json(self.http.as_ref(), &url, package).await?;

        document
            .pointer("/dist-tags/latest")
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                RegistryError::Parse(format!(
                    "npm has no latest dist-tag for {}",
                    package.registry_name()
                ))
            })
    }

    async fn fetch_metadata(
        &self,
        package: &PackageIdentifier,
    ) -> Result<RegistryMetadata, RegistryError> {
        let encoded_name = Self::encode_package_name(&package.registry_name());
        let url = format!("{}/{}/{}", self.base_url, encoded_name, package.version());
        debug!("Fetching npm version: {}", url);

        let document = fetch_json(self.http.as_ref(), &url, package).await?;

        Ok(RegistryMetadata::new(url, document))
    }
}
