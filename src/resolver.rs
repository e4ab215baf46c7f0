//! Resolution orchestrator
//!
//! Groups the registry and extractor of each ecosystem and chains them with
//! the fallback scraper and release resolver:
//! identifier -> metadata -> repository -> release page.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;

use crate::config::ResolverConfig;
use crate::error::RegistryError;
use crate::extractor::{
    CargoExtractor, MavenExtractor, NpmExtractor, PypiExtractor, ReferenceExtractor, RepoSource,
};
use crate::http::{HttpGet, ReqwestHttp};
use crate::observer::{ResolutionEvent, ResolutionObserver, TracingObserver};
use crate::package::{Ecosystem, PackageIdentifier};
use crate::probe::first_success;
use crate::registry::{CratesIoRegistry, MavenRegistry, NpmRegistry, PypiRegistry, Registry};
use crate::release::ReleaseResolver;
use crate::scrape::FallbackScraper;
use crate::vcs::RepoReference;

/// Outcome of resolving one package
///
/// `release_url` is only set when `repo_url` is, and always starts with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub package_name: String,
    pub repo_url: Option<String>,
    /// Concrete version, never the `latest` marker
    pub specified_version: String,
    pub release_url: Option<String>,
}

/// Groups the components needed to resolve packages of one ecosystem.
pub struct PackageResolver {
    registry: Arc<dyn Registry>,
    extractor: Arc<dyn ReferenceExtractor>,
}

impl PackageResolver {
    pub fn new(registry: Arc<dyn Registry>, extractor: Arc<dyn ReferenceExtractor>) -> Self {
        Self {
            registry,
            extractor,
        }
    }

    /// Get the registry for fetching metadata
    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }

    /// Get the extractor for reading repository references
    pub fn extractor(&self) -> &Arc<dyn ReferenceExtractor> {
        &self.extractor
    }
}

/// Create the default set of package resolvers for all supported ecosystems
pub fn create_default_resolvers(
    config: &ResolverConfig,
    http: Arc<dyn HttpGet>,
) -> HashMap<Ecosystem, PackageResolver> {
    let registries = &config.registries;
    let mut resolvers = HashMap::new();

    resolvers.insert(
        Ecosystem::Pypi,
        PackageResolver::new(
            Arc::new(PypiRegistry::new(http.clone(), &registries.pypi)),
            Arc::new(PypiExtractor::new()),
        ),
    );

    resolvers.insert(
        Ecosystem::Npm,
        PackageResolver::new(
            Arc::new(NpmRegistry::new(http.clone(), &registries.npm)),
            Arc::new(NpmExtractor::new()),
        ),
    );

    resolvers.insert(
        Ecosystem::Cargo,
        PackageResolver::new(
            Arc::new(CratesIoRegistry::new(http.clone(), &registries.crates)),
            Arc::new(CargoExtractor::new()),
        ),
    );

    resolvers.insert(
        Ecosystem::Maven,
        PackageResolver::new(
            Arc::new(MavenRegistry::new(http, &registries.maven)),
            Arc::new(MavenExtractor::new()),
        ),
    );

    resolvers
}

/// Resolves package identifiers to their repository and release page
///
/// Holds no per-call state, so one instance can serve concurrent resolutions.
pub struct SourceResolver {
    resolvers: HashMap<Ecosystem, PackageResolver>,
    scraper: FallbackScraper,
    releases: ReleaseResolver,
    observer: Arc<dyn ResolutionObserver>,
}

impl SourceResolver {
    /// Resolver over the public registries described by `config`, logging
    /// through `tracing`
    pub fn new(config: &ResolverConfig) -> Self {
        let http: Arc<dyn HttpGet> = Arc::new(ReqwestHttp::from_config(config));
        let resolvers = create_default_resolvers(config, http.clone());
        Self::with_parts(resolvers, http, Arc::new(TracingObserver))
    }

    pub fn with_parts(
        resolvers: HashMap<Ecosystem, PackageResolver>,
        http: Arc<dyn HttpGet>,
        observer: Arc<dyn ResolutionObserver>,
    ) -> Self {
        Self {
            resolvers,
            scraper: FallbackScraper::new(http.clone(), observer.clone()),
            releases: ReleaseResolver::new(http, observer.clone()),
            observer,
        }
    }

    /// Resolve one package
    ///
    /// Registry failures (unknown package or version, transport failure on
    /// the metadata fetch, malformed document) are returned as errors.
    /// A missing repository or release is a `None` field, never an error.
    pub async fn resolve(
        &self,
        package: &PackageIdentifier,
    ) -> Result<ResolutionResult, RegistryError> {
        let resolver = self
            .resolvers
            .get(&package.ecosystem())
            .ok_or(RegistryError::Unsupported(package.ecosystem()))?;
        let registry = resolver.registry();

        let package = if package.is_latest() {
            let version = registry.resolve_latest(package).await?;
            self.observer.on_event(ResolutionEvent::LatestResolved {
                ecosystem: package.ecosystem(),
                name: package.name().to_string(),
                version: version.clone(),
            });
            package
                .with_version(version)
                .map_err(|e| RegistryError::Parse(e.to_string()))?
        } else {
            package.clone()
        };

        let metadata = registry.fetch_metadata(&package).await?;
        self.observer.on_event(ResolutionEvent::MetadataFetched {
            ecosystem: package.ecosystem(),
            url: metadata.source_url.clone(),
        });

        let repo = first_success(resolver.extractor().sources(&metadata), |source| {
            self.locate(source)
        })
        .await;
        if repo.is_none() {
            self.observer.on_event(ResolutionEvent::RepositoryMissing {
                name: package.to_string(),
            });
        }

        let release_url = self.releases.resolve(repo.as_ref(), package.version()).await;

        Ok(ResolutionResult {
            package_name: package.name().to_string(),
            repo_url: repo.map(|repo| repo.url),
            specified_version: package.version().to_string(),
            release_url,
        })
    }

    /// Resolve several packages concurrently, results in input order
    pub async fn resolve_all(
        &self,
        packages: &[PackageIdentifier],
    ) -> Vec<Result<ResolutionResult, RegistryError>> {
        join_all(packages.iter().map(|package| self.resolve(package))).await
    }

    /// Turn one repository source into a reference, scraping if needed
    async fn locate(&self, source: RepoSource) -> Option<RepoReference> {
        let (url, via) = match source {
            RepoSource::Direct(url) => (url, "metadata"),
            RepoSource::Scrape(page) => (self.scraper.find_repo_link(&page).await?, "scrape"),
        };

        let repo = RepoReference::parse(&url)?;
        self.observer.on_event(ResolutionEvent::RepositoryFound {
            url: repo.url.clone(),
            source: via.to_string(),
        });
        Some(repo)
    }
}
