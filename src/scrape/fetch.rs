//! Page fetching
//!
//! Parsers never touch the network; they receive page bodies from a
//! [`PageFetcher`]. The HTTP implementation is a thin wrapper over `ureq`.

use crate::config::USER_AGENT;
use crate::error::FetchError;
use std::time::Duration;
use tracing::debug;

/// Something that can turn a URL into a page body
///
/// Shared across fetch worker threads.
pub trait PageFetcher: Sync {
    /// Fetch `url` once
    ///
    /// # Errors
    /// Returns `FetchError` on network failure, timeout or a non-success status.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP client with a per-request timeout
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = self.agent.get(url).call().map_err(|err| match err {
            ureq::Error::StatusCode(status) => FetchError::Status {
                url: url.to_string(),
                status,
            },
            other => FetchError::Request {
                url: url.to_string(),
                reason: other.to_string(),
            },
        })?;

        response
            .into_body()
            .read_to_string()
            .map_err(|err| FetchError::Request {
                url: url.to_string(),
                reason: format!("failed reading body: {err}"),
            })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::{FetchError, PageFetcher};
    use rustc_hash::FxHashMap;

    /// Serves canned bodies; unknown URLs are a 404
    #[derive(Default)]
    pub struct CannedFetcher {
        pages: FxHashMap<String, String>,
    }

    impl CannedFetcher {
        pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
            self.pages.insert(url.into(), body.into());
            self
        }
    }

    impl PageFetcher for CannedFetcher {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }
}
