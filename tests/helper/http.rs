//! In-memory HTTP stub

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use purl_source::error::TransportError;
use purl_source::http::{HttpGet, HttpResponse};

/// Serves canned responses by exact URL; anything else is a 404
#[derive(Default)]
pub struct StubHttp {
    responses: HashMap<String, Result<HttpResponse, TransportError>>,
    requests: Mutex<Vec<String>>,
}

impl StubHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn with_timeout(mut self, url: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Err(TransportError::Timeout(url.to_string())),
        );
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpGet for StubHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "Not Found")))
    }
}
