//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod drink;
pub mod recipe;

pub use validation::ValidationError;
pub use category::CategoryName;
pub use drink::{ingredients_from_json, DrinkDetails, DrinkName, FlavorProfile, NewDrink};
pub use recipe::{NewRecipe, RecipePayload};
