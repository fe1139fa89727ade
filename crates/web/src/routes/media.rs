//! Signed download URLs for stored objects.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use artify_core::image::ACCEPTED_IMAGE_TYPES;

use crate::error::{AppError, Result};
use crate::services::StorageError;
use crate::state::AppState;

/// Content type sent for a stored object. Anything that is not an accepted
/// image type is served as opaque bytes.
fn served_content_type(stored: &str) -> &str {
    if ACCEPTED_IMAGE_TYPES.contains(&stored) {
        stored
    } else {
        "application/octet-stream"
    }
}

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub expires: Option<i64>,
    pub sig: Option<String>,
}

/// Serve a stored object.
///
/// GET /media/{*key}?expires=..&sig=..
///
/// # Errors
///
/// 403 when the signature is missing, wrong or expired; 404 when nothing
/// is stored under the key.
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<MediaQuery>,
) -> Result<Response> {
    let (Some(expires), Some(sig)) = (query.expires, query.sig) else {
        return Err(AppError::Forbidden("Invalid or expired link".to_string()));
    };

    let object = match state.storage().fetch(&key, expires, &sig).await {
        Ok(object) => object,
        Err(StorageError::InvalidSignature | StorageError::Expired) => {
            return Err(AppError::Forbidden("Invalid or expired link".to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let object = object.ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                served_content_type(&object.content_type).to_string(),
            ),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            (header::CACHE_CONTROL, "private, max-age=86400".to_string()),
        ],
        object.data,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_image_types_are_served_as_is() {
        assert_eq!(served_content_type("image/png"), "image/png");
        assert_eq!(served_content_type("image/webp"), "image/webp");
        assert_eq!(served_content_type("text/html"), "application/octet-stream");
        assert_eq!(
            served_content_type("image/svg+xml"),
            "application/octet-stream"
        );
    }
}
