//! crates.io API implementation

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::DEFAULT_CRATES_URL;
use crate::error::RegistryError;
use crate::http::HttpGet;
use crate::package::{Ecosystem, PackageIdentifier};
use crate::registry::{Registry, RegistryMetadata, fetch_json};

/// Registry implementation for the crates.io API
pub struct CratesIoRegistry {
    http: Arc<dyn HttpGet>,
    base_url: String,
}

impl CratesIoRegistry {
    pub fn new(http: Arc<dyn HttpGet>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_default_url(http: Arc<dyn HttpGet>) -> Self {
        Self::new(http, DEFAULT_CRATES_URL)
    }

    fn crate_url(&self, name: &str) -> String {
        format!("{}/api/v1/crates/{}", self.base_url, name)
    }
}

#[async_trait::async_trait]
impl Registry for CratesIoRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Cargo
    }

    async fn resolve_latest(&self, package: &PackageIdentifier) -> Result<String, RegistryError> {
        let url = self.crate_url(package.name());
        debug!("Fetching crate: {}", url);

        let document = fetch_json(self.http.as_ref(), &url, package).await?;

        ["/crate/max_stable_version", "/crate/max_version"]
            .iter()
            .filter_map(|pointer| document.pointer(pointer).and_then(Value::as_str))
            .find(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                RegistryError::Parse(format!("crates.io lists no version for {}", package.name()))
            })
    }

    async fn fetch_metadata(
        &self,
        package: &PackageIdentifier,
    ) -> Result<RegistryMetadata, RegistryError> {
        let url = format!("{}/{}", self.crate_url(package.name()), package.version());
        debug!("Fetching crate version: {}", url);

        let mut document = fetch_json(self.http.as_ref(), &url, package).await?;

        // The versioned endpoint has no crate-level links; borrow them from
        // the crate endpoint.
        if !document.get("crate").is_some_and(Value::is_object) {
            let crate_url = self.crate_url(package.name());
            let crate_document = fetch_json(self.http.as_ref(), &crate_url, package).await?;

            if let (Some(object), Some(crate_info)) =
                (document.as_object_mut(), crate_document.get("crate"))
            {
                object.insert("crate".to_string(), crate_info.clone());
            }
        }

        Ok(RegistryMetadata::new(url, document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ReqwestHttp;
    use mockito::Server;

    fn registry(base_url: &str) -> CratesIoRegistry {
        CratesIoRegistry::new(Arc::new(ReqwestHttp::default()), base_url)
    }

    fn package(version: &str) -> PackageIdentifier {
        PackageIdentifier::new(Ecosystem::Cargo, None, "rand", version).unwrap()
    }

    #[tokio::test]
    async fn fetch_metadata_merges_crate_links() {
        let mut server = Server::new_async().await;
        let version_mock = server
            .mock("GET", "/api/v1/crates/rand/0.8.3")
            .with_status(200)
            .with_body(r#"{"version": {"crate": "rand", "num": "0.8.3"}}"#)
            .create_async()
            .await;
        let crate_mock = server
            .mock("GET", "/api/v1/crates/rand")
            .with_status(200)
            .with_body(
                r#"{"crate": {
                    "name": "rand",
                    "repository": "https://github.com/rust-random/rand",
                    "homepage": "https://rust-random.github.io/book"
                }}"#,
            )
            .create_async()
            .await;

        let result = registry(&server.url())
            .fetch_metadata(&package("0.8.3"))
            .await
            .unwrap();

        version_mock.assert_async().await;
        crate_mock.assert_async().await;
        assert_eq!(
            result.str_at("/crate/repository"),
            Some("https://github.com/rust-random/rand")
        );
        assert_eq!(result.str_at("/version/num"), Some("0.8.3"));
    }

    #[tokio::test]
    async fn fetch_metadata_keeps_inline_crate_object() {
        let mut server = Server::new_async().await;
        let version_mock = server
            .mock("GET", "/api/v1/crates/rand/0.8.3")
            .with_status(200)
            .with_body(r#"{"crate": {"repository": "https://github.com/rust-random/rand"}}"#)
            .create_async()
            .await;
        let crate_mock = server
            .mock("GET", "/api/v1/crates/rand")
            .expect(0)
            .create_async()
            .await;

        let result = registry(&server.url())
            .fetch_metadata(&package("0.8.3"))
            .await
            .unwrap();

        version_mock.assert_async().await;
        crate_mock.assert_async().await;
        assert_eq!(
            result.str_at("/crate/repository"),
            Some("https://github.com/rust-random/rand")
        );
    }

    #[tokio::test]
    async fn fetch_metadata_returns_not_found_for_unknown_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/crates/rand/99.0.0")
            .with_status(404)
            .with_body(r#"{"errors": [{"detail": "crate `rand` does not have a version `99.0.0`"}]}"#)
            .create_async()
            .await;

        let result = registry(&server.url())
            .fetch_metadata(&package("99.0.0"))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn resolve_latest_prefers_max_stable_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/crates/rand")
            .with_status(200)
            .with_body(
                r#"{"crate": {"max_version": "0.9.0-alpha.1", "max_stable_version": "0.8.5"}}"#,
            )
            .create_async()
            .await;

        let result = registry(&server.url())
            .resolve_latest(&package("latest"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, "0.8.5");
    }

    #[tokio::test]
    async fn resolve_latest_falls_back_to_max_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/crates/rand")
            .with_status(200)
            .with_body(r#"{"crate": {"max_version": "0.1.0-beta", "max_stable_version": null}}"#)
            .create_async()
            .await;

        let result = registry(&server.url())
            .resolve_latest(&package("latest"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, "0.1.0-beta");
    }
}
