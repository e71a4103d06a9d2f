//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The normalized number is empty.
    EmptyNumber,

    /// The normalized number contains something other than digits and a leading `+`.
    InvalidNumber(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "Phone number cannot be empty"),
            Self::InvalidNumber(number) => write!(f, "Invalid normalized number: {}", number),
        }
    }
}

impl std::error::Error for ValidationError {}
