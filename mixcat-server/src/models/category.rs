//! Category name validation
//!
//! Names are trimmed before storage. Uniqueness is not enforced.

use super::ValidationError;

/// Maximum length for category names
const MAX_CATEGORY_NAME_LEN: usize = 128;

/// Validated, trimmed category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a new category name, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - Non-empty after trimming
    /// - Max 128 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if trimmed.len() > MAX_CATEGORY_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_CATEGORY_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = CategoryName::new("  Cocktails  ").unwrap();
        assert_eq!(name.as_str(), "Cocktails");
    }

    #[test]
    fn rejects_empty() {
        let err = CategoryName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_whitespace_only() {
        let err = CategoryName::new("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let name_128 = "a".repeat(128);
        assert!(CategoryName::new(&name_128).is_ok());

        let name_129 = "a".repeat(129);
        let err = CategoryName::new(&name_129).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }
}
