//! Drink input validation and the typed sub-document contract
//!
//! `details`, `flavorProfile`, and `ingredients` arrive as independently
//! JSON-encoded multipart fields. Each is deserialized exactly once here
//! into a typed struct; a decode failure on any one of them fails the
//! whole request before anything is persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for drink names
const MAX_DRINK_NAME_LEN: usize = 128;

/// Inclusive bounds for every flavor-profile axis
pub const FLAVOR_AXIS_MIN: f64 = 0.0;
pub const FLAVOR_AXIS_MAX: f64 = 10.0;

/// Validated, trimmed drink name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkName(String);

impl DrinkName {
    /// Create a new drink name, trimming surrounding whitespace.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if trimmed.len() > MAX_DRINK_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_DRINK_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Structured detail attributes of a drink. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DrinkDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol_content: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DrinkDetails {
    /// Decode from a JSON-encoded form field.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(raw).map_err(|e| ValidationError::Malformed {
            field: "details",
            detail: e.to_string(),
        })
    }
}

/// Five-axis flavor descriptor. Omitted axes default to 0; every axis is
/// bounded to the inclusive range 0..=10.
///
/// `bitter` accepts the legacy key `amer` from older clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlavorProfile {
    #[serde(default)]
    pub acid: f64,
    #[serde(default)]
    pub sugar: f64,
    #[serde(default)]
    pub creamy: f64,
    #[serde(default)]
    pub spicy: f64,
    #[serde(default, alias = "amer")]
    pub bitter: f64,
}

impl FlavorProfile {
    /// Decode from a JSON-encoded form field, enforcing axis bounds.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let profile: Self =
            serde_json::from_str(raw).map_err(|e| ValidationError::Malformed {
                field: "flavorProfile",
                detail: e.to_string(),
            })?;
        profile.validate()
    }

    fn validate(self) -> Result<Self, ValidationError> {
        let axes = [
            ("acid", self.acid),
            ("sugar", self.sugar),
            ("creamy", self.creamy),
            ("spicy", self.spicy),
            ("bitter", self.bitter),
        ];

        for (field, value) in axes {
            if !value.is_finite() || !(FLAVOR_AXIS_MIN..=FLAVOR_AXIS_MAX).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    min: FLAVOR_AXIS_MIN,
                    max: FLAVOR_AXIS_MAX,
                });
            }
        }

        Ok(self)
    }
}

/// Decode the ingredient list from a JSON-encoded form field.
///
/// Order is preserved and duplicates are kept as submitted.
pub fn ingredients_from_json(raw: &str) -> Result<Vec<String>, ValidationError> {
    serde_json::from_str(raw).map_err(|e| ValidationError::Malformed {
        field: "ingredients",
        detail: e.to_string(),
    })
}

/// Fully decoded drink input: everything the repository needs apart from
/// the generated id and the image reference.
#[derive(Debug, Clone)]
pub struct NewDrink {
    pub name: DrinkName,
    pub category_id: Option<Uuid>,
    pub details: DrinkDetails,
    pub flavor: FlavorProfile,
    pub ingredients: Vec<String>,
}
