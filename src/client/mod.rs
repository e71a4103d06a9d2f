//! Blocking HTTP fetcher used by the web-scrape providers.
//!
//! One call is one GET: no retries and no streaming. The whole body is read
//! before returning. Every `ureq::Response` is owned by the function that
//! produced it, so the connection goes back to the agent (or is closed) on
//! every exit path, including a body that cannot be read.

use crate::config::{Config, DEFAULT_USER_AGENT};
use crate::error::{LookupError, LookupResult};
use crate::metrics::{HttpTimer, LookupMetrics};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT_HEADER: &str = "User-Agent";

/// HTTP GET client with a fixed identifying user agent.
///
/// This client uses `ureq` for synchronous HTTP requests and holds no per-call
/// state, so one instance can be shared across threads.
#[derive(Clone)]
pub struct HttpFetcher {
    /// Default user agent, overridable per call
    user_agent: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: LookupMetrics,
}

impl HttpFetcher {
    /// Create a fetcher from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_options(
            config.user_agent.clone(),
            Duration::from_secs(config.request_timeout),
            LookupMetrics::new(),
        )
    }

    /// Create a fetcher with explicit settings.
    pub fn with_options(
        user_agent: impl Into<String>,
        timeout: Duration,
        metrics: LookupMetrics,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            user_agent: user_agent.into(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Replace the metrics collector, e.g. to share one with a dispatcher.
    pub fn with_metrics(mut self, metrics: LookupMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetch `url` and return the body as text.
    ///
    /// The default user agent is sent unless `headers` carries its own; caller
    /// headers are applied after the defaults and win on a (case-insensitive)
    /// name conflict.
    ///
    /// # Errors
    ///
    /// `HttpStatus` for a non-2xx answer, `Network`/`Timeout` when the request
    /// never completes, `Body` when the response cannot be read as text.
    pub fn fetch(&self, url: &str, headers: Option<&HashMap<String, String>>) -> LookupResult<String> {
        let timer = HttpTimer::new(self.metrics.clone());

        let mut request = self.agent.get(url);
        for (name, value) in self.merge_headers(headers) {
            request = request.set(&name, &value);
        }

        tracing::debug!("GET {}", url);

        let response = match request.call() {
            Ok(response) => response,
            Err(e) => {
                let err = Self::map_error(e);
                let duration = timer.complete_with_error();
                tracing::warn!(
                    url = %url,
                    duration_ms = duration.as_millis() as u64,
                    "GET failed: {}",
                    err
                );
                return Err(err);
            }
        };

        let status = response.status();
        match response.into_string() {
            Ok(body) => {
                let duration = timer.complete();
                tracing::debug!(
                    url = %url,
                    status = status,
                    bytes = body.len(),
                    duration_ms = duration.as_millis() as u64,
                    "GET completed"
                );
                Ok(body)
            }
            Err(e) => {
                timer.complete_with_error();
                tracing::warn!(url = %url, status = status, "Failed to read body: {}", e);
                Err(LookupError::Body(e.to_string()))
            }
        }
    }

    /// Default headers first, then the caller's; later names replace earlier ones.
    fn merge_headers(&self, extra: Option<&HashMap<String, String>>) -> Vec<(String, String)> {
        let mut merged = vec![(USER_AGENT_HEADER.to_string(), self.user_agent.clone())];

        if let Some(extra) = extra {
            for (name, value) in extra {
                merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
                merged.push((name.clone(), value.clone()));
            }
        }

        merged
    }

    /// Map a ureq error to a LookupError.
    fn map_error(error: ureq::Error) -> LookupError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                LookupError::HttpStatus {
                    status: code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed => {
                    LookupError::Network("Connection failed".to_string())
                }
                ureq::ErrorKind::Dns => LookupError::Network(transport.to_string()),
                ureq::ErrorKind::Io if Self::is_timeout(&transport) => LookupError::Timeout,
                _ => LookupError::Network(transport.to_string()),
            },
        }
    }

    /// True when the transport failed because a socket read or write timed out.
    fn is_timeout(transport: &ureq::Transport) -> bool {
        std::error::Error::source(transport)
            .and_then(|source| source.downcast_ref::<io::Error>())
            .map_or(false, |err| {
                matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
            })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::with_options(
            DEFAULT_USER_AGENT,
            Duration::from_secs(10),
            LookupMetrics::new(),
        )
    }
}
