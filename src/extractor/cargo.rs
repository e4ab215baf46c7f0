//! crates.io repository extraction

use crate::extractor::{ReferenceExtractor, RepoSource};
use crate::package::Ecosystem;
use crate::registry::RegistryMetadata;

/// Extractor for crates.io documents: `crate.repository` verbatim, with the
/// crate homepage as a fallback page
pub struct CargoExtractor;

impl CargoExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CargoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceExtractor for CargoExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Cargo
    }

    fn extract(&self, metadata: &RegistryMetadata) -> Vec<RepoSource> {
        metadata
            .str_at("/crate/repository")
            .and_then(RepoSource::direct)
            .into_iter()
            .collect()
    }

    fn fallback_pages(&self, metadata: &RegistryMetadata) -> Vec<String> {
        metadata
            .str_at("/crate/homepage")
            .map(str::to_string)
            .into_iter()
            .collect()
    }
}
