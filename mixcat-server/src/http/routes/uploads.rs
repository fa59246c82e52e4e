//! Raw asset retrieval
//!
//! Served through the asset store rather than a static-file layer so a
//! missing file answers 404 and only a real I/O fault answers 500.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::assets::AssetStore;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /uploads/{filename} - exact bytes as stored
async fn get_asset(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.assets.read(&filename).await?;
    let content_type = AssetStore::content_type(&filename);

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

/// Upload retrieval routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/uploads/{filename}", get(get_asset))
}
