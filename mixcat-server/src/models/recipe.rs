//! Recipe input validation
//!
//! Recipes are administrative content records, decoupled from drinks
//! despite the similar naming.

use serde::Deserialize;

use super::ValidationError;

/// Maximum length for recipe names
const MAX_RECIPE_NAME_LEN: usize = 128;

/// Raw recipe payload as received over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated recipe input.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub description: Option<String>,
}

impl NewRecipe {
    /// Validate a raw payload.
    ///
    /// # Rules
    /// - `name` non-empty after trimming, max 128 characters
    /// - `ingredients` non-empty
    /// - `instructions` non-empty
    pub fn from_payload(payload: RecipePayload) -> Result<Self, ValidationError> {
        let name = payload.name.trim();

        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if name.len() > MAX_RECIPE_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_RECIPE_NAME_LEN,
            });
        }

        if payload.ingredients.is_empty() {
            return Err(ValidationError::Empty {
                field: "ingredients",
            });
        }

        if payload.instructions.is_empty() {
            return Err(ValidationError::Empty {
                field: "instructions",
            });
        }

        Ok(Self {
            name: name.to_owned(),
            ingredients: payload.ingredients,
            instructions: payload.instructions,
            description: payload.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RecipePayload {
        RecipePayload {
            name: "Simple Syrup".into(),
            ingredients: vec!["sugar".into(), "water".into()],
            instructions: vec!["combine".into(), "heat".into()],
            description: None,
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let recipe = NewRecipe::from_payload(payload()).unwrap();
        assert_eq!(recipe.name, "Simple Syrup");
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[test]
    fn rejects_blank_name() {
        let mut p = payload();
        p.name = "   ".into();
        let err = NewRecipe::from_payload(p).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn rejects_empty_ingredients() {
        let mut p = payload();
        p.ingredients.clear();
        let err = NewRecipe::from_payload(p).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty { field: "ingredients" }
        ));
    }

    #[test]
    fn rejects_empty_instructions() {
        let mut p = payload();
        p.instructions.clear();
        let err = NewRecipe::from_payload(p).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty { field: "instructions" }
        ));
    }
}
