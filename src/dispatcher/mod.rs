//! Provider dispatch: first non-empty record wins.
//!
//! Providers are consulted in order. There is no merging of partial results and
//! no placeholder record when everything misses.

mod async_wrapper;
pub use async_wrapper::{AsyncLookupDispatcher, AsyncResolver};

use crate::domain::PhoneNumber;
use crate::error::LookupResult;
use crate::metrics::LookupMetrics;
use crate::models::ContactRecord;
use crate::providers::LookupProvider;
use std::sync::Arc;

/// Shared handle to a provider.
pub type ProviderRef = Arc<dyn LookupProvider>;

/// Resolve `number` against `providers` in order.
///
/// Stops at the first provider that returns a non-empty record. Provider errors
/// are logged and the next provider is tried.
pub fn resolve(number: &PhoneNumber, providers: &[ProviderRef]) -> Option<ContactRecord> {
    providers
        .iter()
        .find_map(|provider| consult(provider.as_ref(), number, None))
}

/// Run one provider and keep its record only if it carries data.
fn consult(
    provider: &dyn LookupProvider,
    number: &PhoneNumber,
    metrics: Option<&LookupMetrics>,
) -> Option<ContactRecord> {
    tracing::debug!(provider = %provider.name(), "Consulting provider");

    let outcome = provider.lookup(number);
    accept(provider.name(), outcome, metrics)
}

/// Turn a provider outcome into the dispatcher's view of it.
pub(crate) fn accept(
    provider: &str,
    outcome: LookupResult<Option<ContactRecord>>,
    metrics: Option<&LookupMetrics>,
) -> Option<ContactRecord> {
    match outcome {
        Ok(Some(record)) if !record.is_empty() => {
            tracing::info!(provider = %provider, "Reverse lookup resolved");
            Some(record)
        }
        Ok(Some(_)) => {
            tracing::debug!(provider = %provider, "Discarding empty record");
            None
        }
        Ok(None) => None,
        Err(e) => {
            if let Some(metrics) = metrics {
                metrics.record_provider_error();
            }
            tracing::error!(provider = %provider, "Provider failed, skipping: {}", e);
            None
        }
    }
}

/// Ordered set of providers consulted for every lookup.
#[derive(Clone)]
pub struct LookupDispatcher {
    providers: Vec<ProviderRef>,
    metrics: LookupMetrics,
}

impl LookupDispatcher {
    pub fn new(providers: Vec<ProviderRef>) -> Self {
        Self {
            providers,
            metrics: LookupMetrics::new(),
        }
    }

    /// Share a metrics collector, e.g. the one the fetcher records into.
    pub fn with_metrics(mut self, metrics: LookupMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    pub fn providers(&self) -> &[ProviderRef] {
        &self.providers
    }

    /// Resolve `number`, returning the first non-empty record.
    pub fn resolve(&self, number: &PhoneNumber) -> Option<ContactRecord> {
        let record = self
            .providers
            .iter()
            .find_map(|provider| consult(provider.as_ref(), number, Some(&self.metrics)));

        self.metrics.record_lookup(record.is_some());
        if record.is_none() {
            tracing::debug!(providers = self.providers.len(), "No provider resolved the number");
        }
        record
    }
}
