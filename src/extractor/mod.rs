//! Repository reference extraction from registry metadata
//!
//! Extractors are pure: they list where a repository URL may be found, in
//! heuristic order, and leave fetching and validation to the resolver.

mod cargo;
mod maven;
mod npm;
mod pypi;

pub use cargo::CargoExtractor;
pub use maven::MavenExtractor;
pub use npm::NpmExtractor;
pub use pypi::PypiExtractor;

use crate::package::Ecosystem;
use crate::registry::RegistryMetadata;
use crate::vcs::is_vcs_url;

/// A place where the repository URL may be found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// URL taken from metadata, already on a known VCS host
    Direct(String),
    /// Page to scan for a VCS link
    Scrape(String),
}

impl RepoSource {
    /// `Direct` if `url` is on a known VCS host
    pub fn direct(url: &str) -> Option<Self> {
        is_vcs_url(url).then(|| RepoSource::Direct(url.to_string()))
    }

    /// `Direct` for VCS URLs, `Scrape` for other web pages, `None` for
    /// placeholders such as PyPI's `UNKNOWN`
    pub fn from_url(url: &str) -> Option<Self> {
        Self::direct(url)
            .or_else(|| is_web_page(url).then(|| RepoSource::Scrape(url.to_string())))
    }
}

/// Returns true for absolute http(s) URLs
pub fn is_web_page(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Trait for ecosystem-specific repository extraction
pub trait ReferenceExtractor: Send + Sync {
    /// Returns the ecosystem this extractor handles
    fn ecosystem(&self) -> Ecosystem;

    /// Repository sources found in metadata, first match wins
    fn extract(&self, metadata: &RegistryMetadata) -> Vec<RepoSource>;

    /// Pages to scrape when no source from [`extract`](Self::extract) yields
    /// a repository
    fn fallback_pages(&self, _metadata: &RegistryMetadata) -> Vec<String> {
        Vec::new()
    }

    /// Every source in order: extracted sources, then fallback scrapes
    fn sources(&self, metadata: &RegistryMetadata) -> Vec<RepoSource> {
        let mut sources = self.extract(metadata);
        sources.extend(
            self.fallback_pages(metadata)
                .into_iter()
                .filter(|page| is_web_page(page))
                .map(RepoSource::Scrape),
        );
        sources
    }
}
