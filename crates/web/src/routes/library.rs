//! The user's saved generations.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use artify_core::library::{
    ImagePlan, PLACEHOLDER_IMAGE_URL, SavedItem, SavedItemKind, SubmittedContent,
};

use crate::db::LibraryRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::StorageError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LibraryQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(rename = "type")]
    pub kind: SavedItemKind,
    #[serde(default)]
    pub content: SubmittedContent,
}

/// Saved items, newest first.
///
/// GET /library?type=story
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<Vec<SavedItem>>> {
    let kind = match query.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(raw) => Some(
            SavedItemKind::from_db(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown item type: {raw}")))?,
        ),
        None => None,
    };

    let items = LibraryRepository::new(state.pool())
        .list(current.id, kind)
        .await?;
    Ok(Json(items))
}

/// Save a generation. Inline images are uploaded first.
///
/// POST /library
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(request): Json<SaveRequest>,
) -> Result<(StatusCode, Json<SavedItem>)> {
    let image_url = match ImagePlan::for_submitted(request.content.image_url.as_deref()) {
        ImagePlan::Keep(url) => url,
        ImagePlan::Placeholder => PLACEHOLDER_IMAGE_URL.to_string(),
        ImagePlan::Upload(image) => {
            match state.storage().store_library_image(current.id, &image).await {
                Ok(url) => url,
                Err(StorageError::InvalidImage(e)) => {
                    tracing::warn!(error = %e, "Saved item image undecodable, using placeholder");
                    PLACEHOLDER_IMAGE_URL.to_string()
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    let content = request.content.into_content(image_url);
    let item = LibraryRepository::new(state.pool())
        .create(current.id, request.kind, &content)
        .await?;

    tracing::info!(item_id = %item.id, kind = %item.kind, "Item saved to library");
    Ok((StatusCode::CREATED, Json(item)))
}
