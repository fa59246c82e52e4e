//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric field outside its allowed range
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// String doesn't match required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Structured field could not be decoded
    Malformed { field: &'static str, detail: String },

    /// Binary payload exceeds the allowed size
    TooLarge { field: &'static str, max_bytes: usize },

    /// Referenced entity does not exist
    UnknownReference { field: &'static str, id: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::Malformed { field, detail } => {
                write!(f, "{} could not be decoded: {}", field, detail)
            }
            Self::TooLarge { field, max_bytes } => {
                write!(f, "{} exceeds maximum size of {} bytes", field, max_bytes)
            }
            Self::UnknownReference { field, id } => {
                write!(f, "{} references unknown id '{}'", field, id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
