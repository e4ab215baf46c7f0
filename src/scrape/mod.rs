//! Fallback scraper: find a repository link on a project homepage
//!
//! Used only when metadata names no repository. Best effort: the first VCS
//! link in document order wins, even if it is a badge or sponsor link.

pub mod anchors;

use std::sync::Arc;

use crate::http::HttpGet;
use crate::observer::{ResolutionEvent, ResolutionObserver};
use crate::vcs::is_vcs_url;

pub use anchors::anchors;

pub struct FallbackScraper {
    http: Arc<dyn HttpGet>,
    observer: Arc<dyn ResolutionObserver>,
}

impl FallbackScraper {
    pub fn new(http: Arc<dyn HttpGet>, observer: Arc<dyn ResolutionObserver>) -> Self {
        Self { http, observer }
    }

    /// Fetch `page_url` and return the first anchor href (lower-cased) that
    /// points at a known VCS host
    ///
    /// Non-success statuses and transport failures yield `None`.
    pub async fn find_repo_link(&self, page_url: &str) -> Option<String> {
        let response = match self.http.get(page_url).await {
            Ok(response) => response,
            Err(error) => {
                self.observer
                    .on_event(ResolutionEvent::ScrapeFailed { error });
                return None;
            }
        };

        if !response.is_success() {
            self.observer.on_event(ResolutionEvent::ScrapeSkipped {
                page: page_url.to_string(),
                status: response.status,
            });
            return None;
        }

        anchors(&response.body)
            .into_iter()
            .map(|href| href.to_lowercase())
            .find(|href| is_vcs_url(href))
    }
}
