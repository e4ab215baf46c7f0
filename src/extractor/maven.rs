//! Maven POM repository extraction

use crate::extractor::{ReferenceExtractor, RepoSource};
use crate::normalize::normalize;
use crate::package::Ecosystem;
use crate::registry::RegistryMetadata;

/// Extractor for parsed POM documents
///
/// `scm.connection` then `scm.url`, both normalized; the project `url` is
/// scraped when neither points at a known VCS host.
pub struct MavenExtractor;

impl MavenExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MavenExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceExtractor for MavenExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    fn extract(&self, metadata: &RegistryMetadata) -> Vec<RepoSource> {
        let scm = ["/scm/connection", "/scm/url"]
            .iter()
            .filter_map(|pointer| metadata.str_at(pointer))
            .find_map(|url| RepoSource::direct(&normalize(url)));

        if scm.is_some() {
            return scm.into_iter().collect();
        }

        metadata
            .str_at("/url")
            .filter(|url| super::is_web_page(url))
            .map(|url| RepoSource::Scrape(url.to_string()))
            .into_iter()
            .collect()
    }
}
