//! Release URL resolution
//!
//! Builds host-specific release/tag/commit-tag page URLs for a version and
//! returns the first one whose page shows a real release.

pub mod candidate;

use std::sync::Arc;

use crate::http::{HttpGet, HttpResponse};
use crate::observer::{RejectReason, ResolutionEvent, ResolutionObserver};
use crate::probe::first_success;
use crate::vcs::RepoReference;

pub use candidate::{CandidateKind, ReleaseUrlCandidate, candidates};

/// Body markers of hosting pages that exist but show nothing for the ref
const EMPTY_STATE_MARKERS: [&str; 6] = [
    "there aren’t any releases",
    "there aren't any releases",
    "no releases here",
    "no commits history",
    "no commit history",
    "there are no commits",
];

/// Classify a candidate page response
///
/// # Returns
/// * `Ok(())` - status 200 without any empty-state marker
/// * `Err(RejectReason)` - why the page does not count as a release
pub fn classify(response: &HttpResponse) -> Result<(), RejectReason> {
    if response.is_not_found() {
        return Err(RejectReason::NotFound);
    }
    if response.status != 200 {
        return Err(RejectReason::Status(response.status));
    }

    let body = response.body.to_lowercase();
    if EMPTY_STATE_MARKERS
        .iter()
        .any(|marker| body.contains(marker))
    {
        return Err(RejectReason::EmptyState);
    }

    Ok(())
}

pub struct ReleaseResolver {
    http: Arc<dyn HttpGet>,
    observer: Arc<dyn ResolutionObserver>,
}

impl ReleaseResolver {
    pub fn new(http: Arc<dyn HttpGet>, observer: Arc<dyn ResolutionObserver>) -> Self {
        Self { http, observer }
    }

    /// Resolve the release page URL of `version` in `repo`
    ///
    /// Candidates are checked strictly in priority order and the first valid
    /// one short-circuits the rest. Never fails: no repository, or no valid
    /// candidate, is `None`.
    pub async fn resolve(&self, repo: Option<&RepoReference>, version: &str) -> Option<String> {
        let repo = repo?;

        let found = first_success(candidates(&repo.url, repo.kind, version), |candidate| {
            self.validate(candidate)
        })
        .await;

        match &found {
            Some(url) => self
                .observer
                .on_event(ResolutionEvent::ReleaseFound { url: url.clone() }),
            None => self.observer.on_event(ResolutionEvent::ReleaseMissing {
                repo_url: repo.url.clone(),
                version: version.to_string(),
            }),
        }

        found
    }

    async fn validate(&self, candidate: ReleaseUrlCandidate) -> Option<String> {
        let verdict = match self.http.get(&candidate.url).await {
            Ok(response) => classify(&response),
            Err(e) => Err(RejectReason::Transport(e)),
        };

        match verdict {
            Ok(()) => Some(candidate.url),
            Err(reason) => {
                self.observer.on_event(ResolutionEvent::CandidateRejected {
                    url: candidate.url,
                    reason,
                });
                None
            }
        }
    }
}
