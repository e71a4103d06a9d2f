use crate::domain::PhoneNumber;
use crate::error::{LookupError, LookupResult};
use crate::models::{
    ContactPhone, ContactRecord, ContactRecordBuilder, ContactSource, Name, PhoneType,
    PhotoReference,
};
use crate::providers::LookupProvider;
use crate::repositories::ContentSource;
use std::sync::Arc;

/// Static settings of a [`ContentDbProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDbConfig {
    /// Identifier of the data source, used in logs
    pub source_id: String,

    /// Numbers shorter than this are not looked up
    pub min_length: usize,

    /// Leading carrier-code characters skipped before the area code
    pub prefix_length: usize,

    /// Characters forming the area-code key
    pub area_code_length: usize,

    /// Column position holding the display name
    pub name_column: usize,
}

impl Default for ContentDbConfig {
    fn default() -> Self {
        Self {
            source_id: "area_codes".to_string(),
            min_length: 11,
            prefix_length: 2,
            area_code_length: 3,
            name_column: 2,
        }
    }
}

/// Provider that maps the area code of a number to a place name stored locally.
pub struct ContentDbProvider {
    config: ContentDbConfig,
    source: Arc<dyn ContentSource>,
}

impl ContentDbProvider {
    /// Create a provider over `source`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the area code is empty or does not fit inside the
    /// minimum number length.
    pub fn new(config: ContentDbConfig, source: Arc<dyn ContentSource>) -> LookupResult<Self> {
        if config.area_code_length == 0 {
            return Err(LookupError::InvalidConfig(
                "area_code_length must be greater than zero".to_string(),
            ));
        }
        if config.prefix_length + config.area_code_length > config.min_length {
            return Err(LookupError::InvalidConfig(format!(
                "prefix ({}) and area code ({}) exceed the minimum length {}",
                config.prefix_length, config.area_code_length, config.min_length
            )));
        }

        Ok(Self { config, source })
    }

    /// Provider with the default area-code layout.
    pub fn with_defaults(source: Arc<dyn ContentSource>) -> Self {
        Self {
            config: ContentDbConfig::default(),
            source,
        }
    }

    pub fn config(&self) -> &ContentDbConfig {
        &self.config
    }

    /// Area-code key for `digits`: skip the carrier prefix, take the code.
    fn area_code(&self, digits: &str) -> String {
        digits
            .chars()
            .skip(self.config.prefix_length)
            .take(self.config.area_code_length)
            .collect()
    }

    /// Read the display name of the first matching row.
    ///
    /// The cursor lives only inside this function, so it is released on every
    /// path before the caller builds a record.
    fn first_name_for(&self, area_code: &str) -> LookupResult<Option<String>> {
        let mut cursor = match self.source.query(area_code) {
            Ok(Some(cursor)) => cursor,
            Ok(None) => {
                tracing::debug!(
                    provider = %self.config.source_id,
                    reason = "no_cursor",
                    "Lookup miss"
                );
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(provider = %self.config.source_id, "Content query failed: {}", e);
                return Ok(None);
            }
        };

        let row = match cursor.next_row() {
            Ok(Some(row)) => row,
            Ok(None) => {
                tracing::debug!(
                    provider = %self.config.source_id,
                    area_code = %area_code,
                    reason = "no_rows",
                    "Lookup miss"
                );
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(provider = %self.config.source_id, "Reading content row failed: {}", e);
                return Ok(None);
            }
        };

        match row.into_iter().nth(self.config.name_column) {
            Some(Some(name)) => Ok(Some(name)),
            Some(None) => {
                tracing::debug!(
                    provider = %self.config.source_id,
                    area_code = %area_code,
                    reason = "no_name",
                    "Lookup miss"
                );
                Ok(None)
            }
            None => Err(LookupError::InvalidConfig(format!(
                "name column {} is out of range for source {}",
                self.config.name_column, self.config.source_id
            ))),
        }
    }
}

impl LookupProvider for ContentDbProvider {
    fn name(&self) -> &str {
        &self.config.source_id
    }

    fn lookup(&self, number: &PhoneNumber) -> LookupResult<Option<ContactRecord>> {
        let digits = number.digits();
        if digits.chars().count() < self.config.min_length {
            tracing::debug!(
                provider = %self.config.source_id,
                reason = "short_number",
                "Lookup miss"
            );
            return Ok(None);
        }

        let area_code = self.area_code(digits);
        let Some(display_name) = self.first_name_for(&area_code)? else {
            return Ok(None);
        };

        let mut builder = ContactRecordBuilder::new(ContactSource::ReverseLookup);
        builder
            .set_name(Name::new(display_name))
            .add_phone_number(ContactPhone::new(number.display(), PhoneType::Main))
            .set_photo_reference(PhotoReference::BusinessPlaceholder);

        Ok(Some(builder.build()))
    }
}
