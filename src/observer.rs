//! Resolution instrumentation
//!
//! The pipeline reports what it does through an injected observer instead of
//! logging directly, so callers decide where events go.

use tracing::{debug, info, warn};

use crate::error::TransportError;
use crate::package::Ecosystem;

/// Why a release URL candidate was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NotFound,
    EmptyState,
    Status(u16),
    Transport(TransportError),
}

/// Events emitted while resolving a single package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionEvent {
    LatestResolved {
        ecosystem: Ecosystem,
        name: String,
        version: String,
    },
    MetadataFetched {
        ecosystem: Ecosystem,
        url: String,
    },
    RepositoryFound {
        url: String,
        source: String,
    },
    RepositoryMissing {
        name: String,
    },
    ScrapeSkipped {
        page: String,
        status: u16,
    },
    ScrapeFailed {
        error: TransportError,
    },
    CandidateRejected {
        url: String,
        reason: RejectReason,
    },
    ReleaseFound {
        url: String,
    },
    ReleaseMissing {
        repo_url: String,
        version: String,
    },
}

/// Receives pipeline events
pub trait ResolutionObserver: Send + Sync {
    fn on_event(&self, event: ResolutionEvent);
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn on_event(&self, event: ResolutionEvent) {
        match event {
            ResolutionEvent::LatestResolved {
                ecosystem,
                name,
                version,
            } => info!("Resolved latest version of {}/{}: {}", ecosystem, name, version),
            ResolutionEvent::MetadataFetched { ecosystem, url } => {
                debug!("Fetched {} metadata from {}", ecosystem, url)
            }
            ResolutionEvent::RepositoryFound { url, source } => {
                info!("Found repository {} via {}", url, source)
            }
            ResolutionEvent::RepositoryMissing { name } => {
                info!("No repository found for {}", name)
            }
            ResolutionEvent::ScrapeSkipped { page, status } => {
                debug!("Skipping scrape of {}: status {}", page, status)
            }
            ResolutionEvent::ScrapeFailed { error } => warn!("Scrape failed: {}", error),
            ResolutionEvent::CandidateRejected { url, reason } => match reason {
                RejectReason::Transport(e) => warn!("Release candidate {} failed: {}", url, e),
                reason => debug!("Release candidate {} rejected: {:?}", url, reason),
            },
            ResolutionEvent::ReleaseFound { url } => info!("Valid release found: {}", url),
            ResolutionEvent::ReleaseMissing { repo_url, version } => debug!(
                "No valid release or tag found for {} and version {}",
                repo_url, version
            ),
        }
    }
}

/// Observer that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {
    fn on_event(&self, _event: ResolutionEvent) {}
}
