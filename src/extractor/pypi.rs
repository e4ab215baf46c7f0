//! PyPI repository extraction

use regex::Regex;
use serde_json::Value;

use crate::extractor::{ReferenceExtractor, RepoSource};
use crate::package::Ecosystem;
use crate::registry::RegistryMetadata;
use crate::vcs::is_vcs_url;

/// Characters that end a sentence around a URL rather than belong to it
const TRAILING_PUNCTUATION: &[char] = &[')', '.', ',', ';', ':', '\'', '"', ']', '>'];

/// Extractor for PyPI JSON metadata
///
/// Order: `project_urls` (label order), `home_page`, `download_url`, then the
/// first VCS URL mentioned in `description`.
pub struct PypiExtractor {
    description_re: Regex,
}

impl PypiExtractor {
    pub fn new() -> Self {
        Self {
            description_re: Regex::new(r"https?://(github|gitlab|bitbucket)\.(com|org)/\S+")
                .expect("Description URL pattern is valid"),
        }
    }

    /// First VCS URL in `project_urls`, in label order
    fn project_url(metadata: &RegistryMetadata) -> Option<RepoSource> {
        metadata
            .document
            .pointer("/info/project_urls")
            .and_then(Value::as_object)?
            .values()
            .filter_map(Value::as_str)
            .find_map(RepoSource::direct)
    }

    fn description_url(&self, metadata: &RegistryMetadata) -> Option<RepoSource> {
        let description = metadata.str_at("/info/description")?;
        let found = self.description_re.find(description)?;

        RepoSource::direct(found.as_str().trim_end_matches(TRAILING_PUNCTUATION))
    }
}

impl Default for PypiExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceExtractor for PypiExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pypi
    }

    fn extract(&self, metadata: &RegistryMetadata) -> Vec<RepoSource> {
        if let Some(source) = Self::project_url(metadata) {
            return vec![source];
        }

        let mut sources = Vec::new();
        if let Some(home_page) = metadata.str_at("/info/home_page")
            && let Some(source) = RepoSource::from_url(home_page)
        {
            // A VCS home page is final; a scrape may still come up empty
            if matches!(source, RepoSource::Direct(_)) {
                return vec![source];
            }
            sources.push(source);
        }
        sources.extend(
            metadata
                .str_at("/info/download_url")
                .and_then(RepoSource::direct),
        );
        sources.extend(self.description_url(metadata));
        sources
    }

    fn fallback_pages(&self, metadata: &RegistryMetadata) -> Vec<String> {
        metadata
            .str_at("/info/download_url")
            .filter(|url| !is_vcs_url(url))
            .map(str::to_string)
            .into_iter()
            .collect()
    }
}
