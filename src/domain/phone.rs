//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The key every provider looks up.
///
/// Holds the canonical digits (`normalized`, optionally prefixed with `+`) and an
/// optional display form supplied by the caller.
///
/// # Example
///
/// ```
/// use reverse_lookup::domain::PhoneNumber;
///
/// let phone = PhoneNumber::with_formatted("+8613812345678", "138 1234 5678").unwrap();
/// assert_eq!(phone.normalized(), "+8613812345678");
/// assert_eq!(phone.formatted(), Some("138 1234 5678"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneNumber {
    normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted: Option<String>,
}

impl PhoneNumber {
    /// Create a PhoneNumber from its normalized form.
    ///
    /// # Validation Rules
    ///
    /// - Must not be empty
    /// - May start with a single `+`
    /// - Everything else must be an ASCII digit
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyNumber` or `ValidationError::InvalidNumber`.
    pub fn new(normalized: impl Into<String>) -> Result<Self, ValidationError> {
        let normalized = normalized.into();
        Self::validate(&normalized)?;
        Ok(Self {
            normalized,
            formatted: None,
        })
    }

    /// Create a PhoneNumber with a display form alongside the normalized digits.
    ///
    /// The display form is not validated; a blank one is dropped.
    pub fn with_formatted(
        normalized: impl Into<String>,
        formatted: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let mut phone = Self::new(normalized)?;
        let formatted = formatted.into();
        if !formatted.trim().is_empty() {
            phone.formatted = Some(formatted);
        }
        Ok(phone)
    }

    fn validate(normalized: &str) -> Result<(), ValidationError> {
        if normalized.is_empty() {
            return Err(ValidationError::EmptyNumber);
        }

        let digits = normalized.strip_prefix('+').unwrap_or(normalized);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidNumber(normalized.to_string()));
        }

        Ok(())
    }

    /// The canonical digits used as the lookup key.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The caller-supplied display form, if any.
    pub fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref()
    }

    /// The normalized form without its leading `+`, if any.
    pub fn digits(&self) -> &str {
        self.normalized
            .strip_prefix('+')
            .unwrap_or(&self.normalized)
    }

    /// Display form when present, normalized digits otherwise.
    pub fn display(&self) -> &str {
        self.formatted().unwrap_or(&self.normalized)
    }

    /// Length of the normalized form in characters.
    pub fn len(&self) -> usize {
        self.normalized.chars().count()
    }

    /// Never true for a constructed number; provided alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

#[derive(Deserialize)]
struct RawPhoneNumber {
    normalized: String,
    #[serde(default)]
    formatted: Option<String>,
}

// Serde support - deserialize with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawPhoneNumber::deserialize(deserializer)?;
        match raw.formatted {
            Some(formatted) => PhoneNumber::with_formatted(raw.normalized, formatted),
            None => PhoneNumber::new(raw.normalized),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
