//! Administrative endpoints: dashboard statistics, users, recipes
//!
//! Authentication sits in front of this service; these handlers assume an
//! already authorized caller.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{Recipe, User};
use crate::http::error::ApiError;
use crate::http::extract::ValidUuid;
use crate::http::server::AppState;
use crate::models::{NewRecipe, RecipePayload};

use super::categories::MessageResponse;

/// Dashboard statistics: five independent counts, no cross-count snapshot
/// consistency.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: i64,
    pub active_users: i64,
    pub total_recipes: i64,
    pub total_categories: i64,
    pub total_drinks: i64,
}

/// User response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            active: u.active,
            created_at: u.created_at,
        }
    }
}

/// Recipe response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub description: Option<String>,
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        Self {
            id: r.id,
            name: r.name,
            ingredients: r.ingredients,
            instructions: r.instructions,
            description: r.description,
        }
    }
}

/// GET /admin/stats - concurrent fan-out over the five counts
///
/// All five queries run in parallel and the response waits for every one
/// of them: the join is all-succeed-or-fail, never partial statistics.
/// Total latency is bounded by the slowest count, not their sum.
async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let store = &state.store;

    let (total_users, active_users, total_recipes, total_categories, total_drinks) =
        tokio::try_join!(
            store.count_users(),
            store.count_active_users(),
            store.count_recipes(),
            store.count_categories(),
            store.count_drinks(),
        )
        .map_err(ApiError::Aggregation)?;

    Ok(Json(StatsResponse {
        total_users,
        active_users,
        total_recipes,
        total_categories,
        total_drinks,
    }))
}

/// GET /admin/users - list users, most recent first
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /admin/recipes - list recipes, name ascending
async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = state.store.list_recipes().await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// POST /admin/recipes - create a recipe
async fn create_recipe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecipePayload>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let input = NewRecipe::from_payload(payload)?;
    let recipe = state.store.create_recipe(input).await?;
    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

/// PUT /admin/recipes/{id} - full-replace update
async fn update_recipe(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    Json(payload): Json<RecipePayload>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let input = NewRecipe::from_payload(payload)?;
    let recipe = state.store.update_recipe(id, input).await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

/// DELETE /admin/recipes/{id}
async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_recipe(id).await?;
    Ok(Json(MessageResponse {
        message: "Recipe deleted successfully",
    }))
}

/// Admin routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/stats", get(stats))
        .route("/admin/users", get(list_users))
        .route("/admin/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/admin/recipes/{id}",
            put(update_recipe).delete(delete_recipe),
        )
}
