//! Reverse phone-number lookup.
//!
//! Resolves a phone number to contact data through a set of pluggable providers:
//! a local area-code table and scraped white-pages style web pages. Every provider
//! produces the same normalized [`ContactRecord`]; the [`LookupDispatcher`] returns
//! the first non-empty one.
//!
//! # Architecture
//!
//! - **domain**: the validated `PhoneNumber` lookup key
//! - **models**: the contact record and its builder
//! - **client**: blocking HTTP fetcher with a fixed user agent
//! - **extract**: regex capture and HTML-to-text helpers for scraped pages
//! - **repositories**: local content stores (SQLite) behind a cursor trait
//! - **providers**: the `LookupProvider` trait and its implementations
//! - **dispatcher**: first-success dispatch, sequential and async
//! - **config**, **error**, **metrics**, **observability**: ambient plumbing
//!
//! # Example
//!
//! ```no_run
//! use reverse_lookup::{Config, HttpFetcher, LookupDispatcher, PhoneNumber, WebScrapeProvider};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let provider = WebScrapeProvider::white_pages(&config, HttpFetcher::new(&config))?;
//! let dispatcher = LookupDispatcher::new(vec![Arc::new(provider)]);
//!
//! let number = PhoneNumber::new("+14155551234")?;
//! if let Some(record) = dispatcher.resolve(&number) {
//!     println!("{}", record.to_json()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod providers;
pub mod repositories;

pub use client::HttpFetcher;
pub use config::Config;
pub use dispatcher::{resolve, AsyncLookupDispatcher, AsyncResolver, LookupDispatcher, ProviderRef};
pub use domain::PhoneNumber;
pub use error::{ConfigError, LookupError, LookupResult};
pub use metrics::{LookupMetrics, MetricsSummary};
pub use models::{ContactRecord, ContactRecordBuilder};
pub use providers::{
    ContentDbConfig, ContentDbProvider, LookupProvider, WebScrapeConfig, WebScrapeProvider,
};
pub use repositories::{ContentCursor, ContentSource, SqliteContentSource};
