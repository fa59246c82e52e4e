//! Drink endpoints
//!
//! The mutation path decodes the structured sub-fields first, checks the
//! category reference, then stores the optional image, then writes - so a
//! malformed request never persists anything.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{CategoryRef, Drink};
use crate::http::error::ApiError;
use crate::http::extract::ValidUuid;
use crate::http::forms::DrinkForm;
use crate::http::server::AppState;
use crate::models::{DrinkDetails, FlavorProfile, NewDrink, ValidationError};

use super::categories::{store_image, MessageResponse};

/// Resolved category embedded in a drink response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRefResponse {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<CategoryRef> for CategoryRefResponse {
    fn from(c: CategoryRef) -> Self {
        Self {
            id: c.id,
            name: c.name,
            image_url: c.image_url,
        }
    }
}

/// Drink response with its category resolved (null when the reference is
/// absent or dangling)
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkResponse {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub category: Option<CategoryRefResponse>,
    pub details: DrinkDetails,
    pub flavor_profile: FlavorProfile,
    pub ingredients: Vec<String>,
    pub image_url: Option<String>,
}

impl From<Drink> for DrinkResponse {
    fn from(d: Drink) -> Self {
        Self {
            id: d.id,
            name: d.name,
            category_id: d.category_id,
            category: d.category.map(CategoryRefResponse::from),
            details: d.details,
            flavor_profile: d.flavor,
            ingredients: d.ingredients,
            image_url: d.image_url,
        }
    }
}

/// Reject drink input referencing a category that does not exist.
///
/// Deleting the category afterwards still leaves a dangling reference;
/// reads tolerate that. This check only guards the write path.
async fn check_category_ref(state: &AppState, input: &NewDrink) -> Result<(), ApiError> {
    if let Some(category_id) = input.category_id {
        if !state.store.category_exists(category_id).await? {
            return Err(ValidationError::UnknownReference {
                field: "category",
                id: category_id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// GET /drinks - list all drinks with resolved categories
async fn list_drinks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DrinkResponse>>, ApiError> {
    let drinks = state.store.list_drinks().await?;
    Ok(Json(drinks.into_iter().map(DrinkResponse::from).collect()))
}

/// POST /drinks - create a drink from a multipart form
async fn create_drink(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DrinkResponse>), ApiError> {
    let form = DrinkForm::from_multipart(multipart).await?;
    check_category_ref(&state, &form.drink).await?;

    let image_url = match &form.image {
        Some(image) => Some(store_image(&state.assets, image).await?),
        None => None,
    };

    let drink = state.store.create_drink(form.drink, image_url).await?;
    Ok((StatusCode::CREATED, Json(DrinkResponse::from(drink))))
}

/// PUT /drinks/{id} - full-replace update, image kept unless replaced
async fn update_drink(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    multipart: Multipart,
) -> Result<Json<DrinkResponse>, ApiError> {
    let form = DrinkForm::from_multipart(multipart).await?;
    check_category_ref(&state, &form.drink).await?;

    let existing = state.store.get_drink(id).await?;

    let image_url = match &form.image {
        Some(image) => Some(store_image(&state.assets, image).await?),
        None => None,
    };
    let replacing = image_url.is_some();

    let drink = state.store.update_drink(id, form.drink, image_url).await?;

    if replacing {
        if let Some(old) = existing.image_url {
            state.assets.remove(&old).await;
        }
    }

    Ok(Json(DrinkResponse::from(drink)))
}

/// DELETE /drinks/{id}
async fn delete_drink(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed_image = state.store.delete_drink(id).await?;

    if let Some(reference) = removed_image {
        state.assets.remove(&reference).await;
    }

    Ok(Json(MessageResponse {
        message: "Drink deleted successfully",
    }))
}

/// Drink routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drinks", get(list_drinks).post(create_drink))
        .route("/drinks/{id}", put(update_drink).delete(delete_drink))
}
