use crate::client::HttpFetcher;
use crate::config::Config;
use crate::domain::PhoneNumber;
use crate::error::{LookupError, LookupResult};
use crate::extract::{compile, decode_entities, first_capture, html_to_text};
use crate::models::{
    Address, AddressType, ContactPhone, ContactRecord, ContactRecordBuilder, ContactSource, Name,
    PhoneType, Website, WebsiteType,
};
use crate::providers::LookupProvider;
use regex::Regex;
use std::collections::HashMap;

const NUMBER_PLACEHOLDER: &str = "{number}";

/// Declarative description of a scraped lookup page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebScrapeConfig {
    /// Provider identifier, used in logs
    pub name: String,

    /// Endpoint with a `{number}` placeholder
    pub url_template: String,

    /// Pattern whose group 1 is the display name (required)
    pub name_pattern: String,

    /// Pattern whose group 1 is the display-formatted number
    pub number_pattern: Option<String>,

    /// Pattern whose group 1 is the postal address
    pub address_pattern: Option<String>,

    /// Pattern whose group 1 is a profile URL
    pub website_pattern: Option<String>,

    /// Whether `.` in the patterns matches newlines
    pub dot_all: bool,

    /// Extra request headers, applied after the fetcher defaults
    pub headers: HashMap<String, String>,

    /// Country prefix removed from the number before it is substituted
    pub strip_country_prefix: Option<String>,
}

impl WebScrapeConfig {
    /// White-pages style reverse phone page.
    pub fn white_pages(config: &Config) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "text/html".to_string());
        headers.insert("Accept-Language".to_string(), "en-US,en;q=0.5".to_string());

        Self {
            name: "white_pages".to_string(),
            url_template: config.white_pages_url_template.clone(),
            name_pattern: r#"<h1[^>]*class="[^"]*\bname\b[^"]*"[^>]*>(.*?)</h1>"#.to_string(),
            number_pattern: Some(
                r#"<span[^>]*class="[^"]*\bphone\b[^"]*"[^>]*>(.*?)</span>"#.to_string(),
            ),
            address_pattern: Some(
                r#"<div[^>]*class="[^"]*\baddress\b[^"]*"[^>]*>(.*?)</div>"#.to_string(),
            ),
            website_pattern: Some(
                r#"<a[^>]*class="[^"]*\bprofile-link\b[^"]*"[^>]*href="([^"]*)""#.to_string(),
            ),
            dot_all: true,
            headers,
            strip_country_prefix: Some("+1".to_string()),
        }
    }
}

/// Patterns compiled once at construction.
struct CompiledPatterns {
    name: Regex,
    number: Option<Regex>,
    address: Option<Regex>,
    website: Option<Regex>,
}

impl CompiledPatterns {
    fn compile(config: &WebScrapeConfig) -> LookupResult<Self> {
        let one = |field: &str, pattern: &str| {
            compile(pattern, config.dot_all).map_err(|e| LookupError::InvalidPattern {
                field: field.to_string(),
                reason: e.to_string(),
            })
        };
        let optional = |field: &str, pattern: &Option<String>| {
            pattern.as_deref().map(|p| one(field, p)).transpose()
        };

        Ok(Self {
            name: one("name", &config.name_pattern)?,
            number: optional("number", &config.number_pattern)?,
            address: optional("address", &config.address_pattern)?,
            website: optional("website", &config.website_pattern)?,
        })
    }
}

/// Provider that fetches a page for the number and scrapes identity fields from it.
pub struct WebScrapeProvider {
    config: WebScrapeConfig,
    patterns: CompiledPatterns,
    fetcher: HttpFetcher,
}

impl WebScrapeProvider {
    /// Create a provider, validating the template and compiling every pattern.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for an unusable template, `InvalidPattern` for a pattern
    /// that does not compile.
    pub fn new(config: WebScrapeConfig, fetcher: HttpFetcher) -> LookupResult<Self> {
        if !config.url_template.starts_with("http://")
            && !config.url_template.starts_with("https://")
        {
            return Err(LookupError::InvalidConfig(format!(
                "{}: endpoint must start with http:// or https://",
                config.name
            )));
        }
        if !config.url_template.contains(NUMBER_PLACEHOLDER) {
            return Err(LookupError::InvalidConfig(format!(
                "{}: endpoint has no {} placeholder",
                config.name, NUMBER_PLACEHOLDER
            )));
        }

        let patterns = CompiledPatterns::compile(&config)?;
        Ok(Self {
            config,
            patterns,
            fetcher,
        })
    }

    /// White-pages provider built from the loaded configuration.
    pub fn white_pages(config: &Config, fetcher: HttpFetcher) -> LookupResult<Self> {
        Self::new(WebScrapeConfig::white_pages(config), fetcher)
    }

    pub fn config(&self) -> &WebScrapeConfig {
        &self.config
    }

    /// Endpoint URL for `number`.
    pub fn build_url(&self, number: &PhoneNumber) -> String {
        let normalized = number.normalized();
        let digits = self
            .config
            .strip_country_prefix
            .as_deref()
            .and_then(|prefix| normalized.strip_prefix(prefix))
            .unwrap_or(normalized);

        self.config
            .url_template
            .replace(NUMBER_PLACEHOLDER, &urlencoding::encode(digits))
    }

    fn extract(&self, regex: Option<&Regex>, body: &str) -> Option<String> {
        let raw = first_capture(body, regex?)?;
        html_to_text(Some(&raw)).filter(|text| !text.is_empty())
    }
}

impl LookupProvider for WebScrapeProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn lookup(&self, number: &PhoneNumber) -> LookupResult<Option<ContactRecord>> {
        let url = self.build_url(number);

        let body = match self.fetcher.fetch(&url, Some(&self.config.headers)) {
            Ok(body) => body,
            Err(e) => {
                self.fetcher.metrics().record_transport_failure();
                tracing::warn!(
                    provider = %self.config.name,
                    transport_failure = e.is_transport(),
                    "Fetch failed, reporting no result: {}",
                    e
                );
                return Ok(None);
            }
        };

        let Some(display_name) = self.extract(Some(&self.patterns.name), &body) else {
            tracing::debug!(provider = %self.config.name, reason = "no_name", "Lookup miss");
            return Ok(None);
        };

        let phone_number = self
            .extract(self.patterns.number.as_ref(), &body)
            .unwrap_or_else(|| number.display().to_string());

        let mut builder = ContactRecordBuilder::new(ContactSource::ReverseLookup);
        builder
            .set_name(Name::new(display_name))
            .add_phone_number(ContactPhone::new(phone_number, PhoneType::Main))
            .set_info_url(url);

        if let Some(address) = self.extract(self.patterns.address.as_ref(), &body) {
            builder.add_address(Address::new(address, AddressType::Home));
        }

        // Blank or missing profile links are left out of the record.
        let website = self
            .patterns
            .website
            .as_ref()
            .and_then(|regex| first_capture(&body, regex))
            .map(|href| decode_entities(&href))
            .filter(|href| !href.trim().is_empty());
        if let Some(url) = website {
            builder.add_website(Website::new(url, WebsiteType::Profile));
        }

        Ok(Some(builder.build()))
    }
}
