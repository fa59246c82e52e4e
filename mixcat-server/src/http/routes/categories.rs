//! Category endpoints

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::assets::AssetStore;
use crate::db::repos::Category;
use crate::http::error::ApiError;
use crate::http::extract::ValidUuid;
use crate::http::forms::{CategoryForm, UploadedImage};
use crate::http::server::AppState;

/// Category response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            image_url: c.image_url,
        }
    }
}

/// Delete confirmation
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Store the uploaded image, returning its public reference.
pub(super) async fn store_image(
    assets: &AssetStore,
    image: &UploadedImage,
) -> Result<String, ApiError> {
    let filename = assets
        .store(&image.bytes, image.filename.as_deref())
        .await?;
    Ok(AssetStore::public_path(&filename))
}

/// GET /categories - list all categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// POST /categories - create a category from a multipart form
async fn create_category(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let form = CategoryForm::from_multipart(multipart).await?;

    let image_url = match &form.image {
        Some(image) => Some(store_image(&state.assets, image).await?),
        None => None,
    };

    let category = state.store.create_category(form.name, image_url).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// PUT /categories/{id} - full-replace update
///
/// A new image replaces the stored one, whose file is then removed
/// best-effort; without a new image the stored reference is kept.
async fn update_category(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    multipart: Multipart,
) -> Result<Json<CategoryResponse>, ApiError> {
    let form = CategoryForm::from_multipart(multipart).await?;

    // Resolve before writing any asset so an unknown id is a clean 404
    let existing = state.store.get_category(id).await?;

    let image_url = match &form.image {
        Some(image) => Some(store_image(&state.assets, image).await?),
        None => None,
    };
    let replacing = image_url.is_some();

    let category = state.store.update_category(id, form.name, image_url).await?;

    if replacing {
        if let Some(old) = existing.image_url {
            state.assets.remove(&old).await;
        }
    }

    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categories/{id}
///
/// Drinks referencing the category are left untouched; their reference
/// dangles and drink reads resolve it to null.
async fn delete_category(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed_image = state.store.delete_category(id).await?;

    if let Some(reference) = removed_image {
        state.assets.remove(&reference).await;
    }

    Ok(Json(MessageResponse {
        message: "Category deleted successfully",
    }))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
}
