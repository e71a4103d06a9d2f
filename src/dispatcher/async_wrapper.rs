//! Async dispatch over blocking providers.
//!
//! Providers do blocking I/O, so each one runs on `tokio::task::spawn_blocking`.
//! All of them start at once; results are then awaited in provider order so the
//! outcome matches the sequential [`LookupDispatcher`](super::LookupDispatcher).
//! Tasks that are superseded keep running on the blocking pool and their results
//! are discarded.

use super::{accept, ProviderRef};
use crate::domain::PhoneNumber;
use crate::metrics::LookupMetrics;
use crate::models::ContactRecord;
use async_trait::async_trait;

/// Async interface for resolving a number to a contact record.
///
/// The answer equals the sequential [`LookupDispatcher`](super::LookupDispatcher)'s,
/// but [`AsyncLookupDispatcher`] starts every provider up front: providers after
/// the winner are still called, and their results are discarded. Use the
/// sequential dispatcher when later providers must not be consulted at all.
#[async_trait]
pub trait AsyncResolver: Send + Sync {
    async fn resolve(&self, number: &PhoneNumber) -> Option<ContactRecord>;
}

/// Concurrent, order-preserving dispatcher for async hosts.
#[derive(Clone)]
pub struct AsyncLookupDispatcher {
    providers: Vec<ProviderRef>,
    metrics: LookupMetrics,
}

impl AsyncLookupDispatcher {
    pub fn new(providers: Vec<ProviderRef>) -> Self {
        Self {
            providers,
            metrics: LookupMetrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: LookupMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }
}

impl From<super::LookupDispatcher> for AsyncLookupDispatcher {
    fn from(dispatcher: super::LookupDispatcher) -> Self {
        Self {
            providers: dispatcher.providers().to_vec(),
            metrics: dispatcher.metrics().clone(),
        }
    }
}

#[async_trait]
impl AsyncResolver for AsyncLookupDispatcher {
    async fn resolve(&self, number: &PhoneNumber) -> Option<ContactRecord> {
        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = provider.clone();
                let number = number.clone();
                let name = provider.name().to_string();
                let handle = tokio::task::spawn_blocking(move || provider.lookup(&number));
                (name, handle)
            })
            .collect();

        let mut record = None;
        // Breaking out drops the remaining handles, which detaches their tasks.
        for (name, handle) in handles {
            match handle.await {
                Ok(outcome) => record = accept(&name, outcome, Some(&self.metrics)),
                Err(e) => {
                    self.metrics.record_provider_error();
                    tracing::error!(provider = %name, "Provider task failed: {}", e);
                }
            }
            if record.is_some() {
                break;
            }
        }

        self.metrics.record_lookup(record.is_some());
        record
    }
}
