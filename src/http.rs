//! HTTP GET transport shared by registries, the scraper and release validation

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::config::ResolverConfig;
use crate::error::TransportError;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Trait for issuing a bounded-time GET request
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HttpGet: Send + Sync {
    /// Fetches `url`, returning any status the server answers with
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` - The server responded, whatever the status
    /// * `Err(TransportError)` - Connection failure or timeout
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// [`HttpGet`] backed by reqwest
#[derive(Clone)]
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(Duration::from_millis(config.timeout_ms), &config.user_agent)
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

#[async_trait::async_trait]
impl HttpGet for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        Ok(HttpResponse { status, body })
    }
}
