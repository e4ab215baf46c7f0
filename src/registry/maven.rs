//! Maven Central implementation
//!
//! Metadata comes from the version's POM; latest-version discovery from the
//! artifact's `maven-metadata.xml`.

use std::sync::Arc;

use semver::Version;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::DEFAULT_MAVEN_URL;
use crate::error::RegistryError;
use crate::http::HttpGet;
use crate::package::{Ecosystem, PackageIdentifier};
use crate::registry::{Registry, RegistryMetadata, fetch_body};

/// The parts of a POM the resolver reads
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Pom {
    scm: Option<PomScm>,
    /// Project homepage
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PomScm {
    connection: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetadataXml {
    versioning: Option<VersioningXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VersioningXml {
    latest: Option<String>,
    release: Option<String>,
    versions: Option<VersionsXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VersionsXml {
    version: Vec<String>,
}

/// Version listing from `maven-metadata.xml`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MavenVersioning {
    pub latest_version: Option<String>,
    pub release_version: Option<String>,
    pub all_versions: Vec<String>,
}

impl MavenVersioning {
    /// Parse a `maven-metadata.xml` document
    pub fn parse(xml: &str) -> Result<Self, RegistryError> {
        let metadata: MetadataXml = quick_xml::de::from_str(xml).map_err(|e| {
            warn!("Failed to parse maven-metadata.xml: {}", e);
            RegistryError::Parse(e.to_string())
        })?;
        let versioning = metadata.versioning.unwrap_or_default();

        Ok(Self {
            latest_version: non_blank(versioning.latest),
            release_version: non_blank(versioning.release),
            all_versions: versioning
                .versions
                .map(|versions| versions.version)
                .unwrap_or_default(),
        })
    }

    /// The version `latest` stands for: `<latest>`, then `<release>`, then
    /// the highest listed version
    pub fn preferred(&self) -> Option<String> {
        self.latest_version
            .clone()
            .or_else(|| self.release_version.clone())
            .or_else(|| find_semantic_max(&self.all_versions))
            .or_else(|| self.all_versions.last().cloned())
    }
}

/// Find the semantically maximum version, skipping non-semver entries
fn find_semantic_max(versions: &[String]) -> Option<String> {
    versions
        .iter()
        .filter_map(|v| Version::parse(v).ok().map(|parsed| (v, parsed)))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(original, _)| original.clone())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a POM into the metadata document `{scm: {connection, url}, url}`
///
/// A POM without an `<scm>` section yields a document without `scm`.
pub fn parse_pom(xml: &str) -> Result<Value, RegistryError> {
    let pom: Pom = quick_xml::de::from_str(xml).map_err(|e| {
        warn!("Failed to parse Maven POM: {}", e);
        RegistryError::Parse(e.to_string())
    })?;

    let mut document = Map::new();
    if let Some(scm) = pom.scm {
        let mut section = Map::new();
        if let Some(connection) = non_blank(scm.connection) {
            section.insert("connection".to_string(), Value::String(connection));
        }
        if let Some(url) = non_blank(scm.url) {
            section.insert("url".to_string(), Value::String(url));
        }
        document.insert("scm".to_string(), Value::Object(section));
    } else {
        debug!("No SCM section found in the POM file");
    }
    if let Some(url) = non_blank(pom.url) {
        document.insert("url".to_string(), Value::String(url));
    }

    Ok(Value::Object(document))
}

/// Registry implementation for Maven repositories
pub struct MavenRegistry {
    http: Arc<dyn HttpGet>,
    base_url: String,
}

impl MavenRegistry {
    pub fn new(http: Arc<dyn HttpGet>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_default_url(http: Arc<dyn HttpGet>) -> Self {
        Self::new(http, DEFAULT_MAVEN_URL)
    }

    /// `{base}/maven2/{group/path}/{artifact}`
    fn artifact_url(&self, package: &PackageIdentifier) -> String {
        let group_path = package.namespace().unwrap_or_default().replace('.', "/");
        format!("{}/maven2/{}/{}", self.base_url, group_path, package.name())
    }

    /// Fetch the artifact's version listing
    pub async fn fetch_versioning(
        &self,
        package: &PackageIdentifier,
    ) -> Result<MavenVersioning, RegistryError> {
        let url = format!("{}/maven-metadata.xml", self.artifact_url(package));
        debug!("Fetching Maven metadata for latest version: {}", url);

        let body = fetch_body(self.http.as_ref(), &url, package).await?;
        MavenVersioning::parse(&body)
    }
}

#[async_trait::async_trait]
impl Registry for MavenRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    async fn resolve_latest(&self, package: &PackageIdentifier) -> Result<String, RegistryError> {
        self.fetch_versioning(package)
            .await?
            .preferred()
            .ok_or_else(|| {
                RegistryError::Parse(format!("No latest version found for {}", package.name()))
            })
    }

    async fn fetch_metadata(
        &self,
        package: &PackageIdentifier,
    ) -> Result<RegistryMetadata, RegistryError> {
        let url = format!(
            "{}/{}/{}-{}.pom",
            self.artifact_url(package),
            package.version(),
            package.name(),
            package.version()
        );
        debug!("Fetching Maven POM file from {}", url);

        let body = fetch_body(self.http.as_ref(), &url, package).await?;
        let document = parse_pom(&body)?;

        Ok(RegistryMetadata::new(url, document))
    }
}
