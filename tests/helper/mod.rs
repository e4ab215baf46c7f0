//! Shared fixtures for end-to-end resolution tests

#![allow(dead_code)]

mod http;

pub use http::StubHttp;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use purl_source::SourceResolver;
use purl_source::config::{RegistriesConfig, ResolverConfig};
use purl_source::observer::{ResolutionEvent, ResolutionObserver};
use purl_source::package::Ecosystem;
use purl_source::resolver::{PackageResolver, create_default_resolvers};

pub const PYPI_URL: &str = "https://pypi.test";
pub const NPM_URL: &str = "https://npm.test";
pub const CRATES_URL: &str = "https://crates.test";
pub const MAVEN_URL: &str = "https://maven.test";

/// Observer that keeps every event for assertions
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ResolutionEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ResolutionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ResolutionObserver for RecordingObserver {
    fn on_event(&self, event: ResolutionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Config pointing every registry at a stub host
pub fn test_config() -> ResolverConfig {
    ResolverConfig {
        registries: RegistriesConfig {
            pypi: PYPI_URL.to_string(),
            npm: NPM_URL.to_string(),
            crates: CRATES_URL.to_string(),
            maven: MAVEN_URL.to_string(),
        },
        ..ResolverConfig::default()
    }
}

/// Resolver wired to the real registries and extractors over `http`
pub fn create_test_resolver(
    http: Arc<StubHttp>,
    observer: Arc<RecordingObserver>,
) -> SourceResolver {
    let resolvers: HashMap<Ecosystem, PackageResolver> =
        create_default_resolvers(&test_config(), http.clone());
    SourceResolver::with_parts(resolvers, http, observer)
}
