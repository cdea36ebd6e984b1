//! HTTP fetcher
//!
//! All network traffic for a run goes through one `Fetcher`, which owns the
//! HTTP client and the pacing gate. Every failure mode is classified into a
//! `FetchOutcome` variant so the orchestrator can keep traversing; the
//! fetcher itself never propagates request errors.

use crate::crawler::pacing::PacingGate;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Result of fetching one URL
///
/// Exactly one of four shapes: a successful response, an HTTP error status,
/// a request timeout, or a transport-level failure. Immutable once produced.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx/3xx response with a readable body
    Success {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
        /// Request latency (pacing wait excluded)
        elapsed: Duration,
    },

    /// Response with status >= 400
    HttpError { status: u16, elapsed: Duration },

    /// The request exceeded the configured timeout
    Timeout { elapsed: Duration },

    /// DNS or socket-level failure, or any other transport error
    ConnectionError { error: String, elapsed: Duration },
}

impl FetchOutcome {
    /// Returns true for the `Success` variant
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Request latency regardless of outcome
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Success { elapsed, .. }
            | Self::HttpError { elapsed, .. }
            | Self::Timeout { elapsed }
            | Self::ConnectionError { elapsed, .. } => *elapsed,
        }
    }
}

/// Rate-limited HTTP fetcher
pub struct Fetcher {
    client: Client,
    gate: PacingGate,
}

impl Fetcher {
    /// Builds a fetcher with the given identity, per-request timeout, and
    /// minimum inter-request delay
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        min_delay: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            gate: PacingGate::new(min_delay),
        })
    }

    /// Fetches a URL, consuming one unit of the pacing budget
    ///
    /// The gate is acquired before the request is sent, so failed calls
    /// count against the budget like successful ones.
    pub async fn fetch(&mut self, url: &Url) -> FetchOutcome {
        self.gate.acquire().await;

        let start = Instant::now();
        match self.client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if status >= 400 {
                    return FetchOutcome::HttpError {
                        status,
                        elapsed: start.elapsed(),
                    };
                }

                match response.text().await {
                    Ok(body) => FetchOutcome::Success {
                        status,
                        body,
                        elapsed: start.elapsed(),
                    },
                    Err(e) => classify_error(e, start.elapsed()),
                }
            }
            Err(e) => classify_error(e, start.elapsed()),
        }
    }
}

/// Maps a reqwest error to a fetch outcome
///
/// Timeouts get their own variant; everything else (DNS, refused
/// connections, TLS, truncated bodies) surfaces as a connection error.
fn classify_error(error: reqwest::Error, elapsed: Duration) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::Timeout { elapsed }
    } else if error.is_connect() {
        FetchOutcome::ConnectionError {
            error: "connection failed".to_string(),
            elapsed,
        }
    } else {
        FetchOutcome::ConnectionError {
            error: error.to_string(),
            elapsed,
        }
    }
}
