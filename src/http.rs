//! Blocking HTTP fetch abstraction for dependency injection.
//!
//! Provides the [`Fetcher`] trait so that tasks and the manifest loader can
//! be unit-tested without a network. Production code uses [`UreqFetcher`];
//! tests use the mockall-generated `MockFetcher` or a hand-rolled fake.
//!
//! All requests are synchronous and blocking, with no retries and no
//! timeouts: a hung request blocks the run, matching the strictly
//! sequential execution model of the pipeline.

use crate::error::FetchError;

/// Abstraction over blocking HTTP GET requests.
///
/// Implement this trait to swap in a canned fetcher during tests, keeping
/// task logic independent of real network I/O. The production implementation
/// is [`UreqFetcher`].
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher: Send + Sync {
    /// Fetch the raw response body of `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body cannot be read to completion.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Production [`Fetcher`] backed by [`ureq`].
#[derive(Debug, Default)]
pub struct UreqFetcher;

impl UreqFetcher {
    /// Create a new fetcher using ureq's default agent configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Fetcher for UreqFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = ureq::get(url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => FetchError::Status {
                url: url.to_string(),
                status,
            },
            other => FetchError::Transport {
                url: url.to_string(),
                source: Box::new(other),
            },
        })?;

        // Mod jars routinely exceed ureq's default body limit.
        response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn fetcher_is_object_safe() {
        let fetcher: Box<dyn Fetcher> = Box::new(UreqFetcher::new());
        let _ = &fetcher;
    }

    #[test]
    fn mock_fetcher_returns_canned_bytes() {
        let mut mock = MockFetcher::new();
        mock.expect_fetch_bytes()
            .with(eq("https://example.com/a.jar"))
            .times(1)
            .returning(|_| Ok(b"jar bytes".to_vec()));

        let bytes = mock
            .fetch_bytes("https://example.com/a.jar")
            .expect("mock should return bytes");
        assert_eq!(bytes, b"jar bytes");
    }

    #[test]
    fn mock_fetcher_propagates_status_error() {
        let mut mock = MockFetcher::new();
        mock.expect_fetch_bytes().returning(|url| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        });

        let err = mock
            .fetch_bytes("https://example.com/missing.jar")
            .expect_err("mock should fail");
        assert!(err.to_string().contains("404"));
    }
}
