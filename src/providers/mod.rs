//! Reverse lookup providers.
//!
//! A provider resolves one phone number against one data source. Finding nothing
//! is `Ok(None)`; transport and parse failures are absorbed inside the provider
//! and also surface as `Ok(None)`. `Err` is reserved for configuration problems,
//! which the dispatcher logs and skips.

mod content_db;
mod web_scrape;

pub use content_db::{ContentDbConfig, ContentDbProvider};
pub use web_scrape::{WebScrapeConfig, WebScrapeProvider};

use crate::domain::PhoneNumber;
use crate::error::LookupResult;
use crate::models::ContactRecord;

/// One strategy for resolving a number to contact data.
///
/// Implementations hold only immutable configuration, so a single instance may
/// serve concurrent lookups.
pub trait LookupProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Resolve `number`, returning `Ok(None)` when nothing was found.
    fn lookup(&self, number: &PhoneNumber) -> LookupResult<Option<ContactRecord>>;
}
