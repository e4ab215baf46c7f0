//! Registry metadata fetchers, one per ecosystem

pub mod crates_io;
pub mod maven;
pub mod npm;
pub mod pypi;

pub use crates_io::CratesIoRegistry;
pub use maven::MavenRegistry;
pub use npm::NpmRegistry;
pub use pypi::PypiRegistry;

#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use tracing::warn;

use crate::error::RegistryError;
use crate::http::HttpGet;
use crate::package::{Ecosystem, PackageIdentifier};

/// Raw package metadata of one package version
///
/// The document keeps the registry's field order, which matters for
/// label-ordered maps such as PyPI's `project_urls`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryMetadata {
    /// URL the document was fetched from
    pub source_url: String,
    pub document: Value,
}

impl RegistryMetadata {
    pub fn new(source_url: impl Into<String>, document: Value) -> Self {
        Self {
            source_url: source_url.into(),
            document,
        }
    }

    /// Non-blank string at a JSON pointer (e.g. `/info/home_page`)
    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.document
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Trait for fetching package metadata from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the ecosystem this implementation handles
    fn ecosystem(&self) -> Ecosystem;

    /// Resolves the concrete version the registry currently calls latest
    ///
    /// # Returns
    /// * `Ok(String)` - The concrete version
    /// * `Err(RegistryError)` - Unknown package, transport failure, or no version listed
    async fn resolve_latest(&self, package: &PackageIdentifier) -> Result<String, RegistryError>;

    /// Fetches metadata for the exact name and version of `package`
    ///
    /// # Returns
    /// * `Ok(RegistryMetadata)` - The version's metadata document
    /// * `Err(RegistryError::NotFound)` - The registry answered with a non-success status
    async fn fetch_metadata(
        &self,
        package: &PackageIdentifier,
    ) -> Result<RegistryMetadata, RegistryError>;
}

/// GET a document, mapping any non-success status to `NotFound`
pub(crate) async fn fetch_body(
    http: &dyn HttpGet,
    url: &str,
    package: &PackageIdentifier,
) -> Result<String, RegistryError> {
    let response = http.get(url).await?;

    if !response.is_success() {
        warn!(
            "{} registry returned status {}: {}",
            package.ecosystem(),
            response.status,
            url
        );
        return Err(RegistryError::NotFound(package.to_string()));
    }

    Ok(response.body)
}

/// GET and decode a JSON document
pub(crate) async fn fetch_json(
    http: &dyn HttpGet,
    url: &str,
    package: &PackageIdentifier,
) -> Result<Value, RegistryError> {
    let body = fetch_body(http, url, package).await?;

    serde_json::from_str(&body).map_err(|e| {
        warn!("Failed to parse {} registry response: {}", package.ecosystem(), e);
        RegistryError::Parse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn str_at_skips_blank_values() {
        let metadata = RegistryMetadata::new(
            "https://pypi.org/pypi/x/1.0/json",
            json!({"info": {"home_page": "  ", "download_url": " https://x.org "}}),
        );

        assert_eq!(metadata.str_at("/info/home_page"), None);
        assert_eq!(metadata.str_at("/info/download_url"), Some("https://x.org"));
        assert_eq!(metadata.str_at("/info/missing"), None);
    }
}
