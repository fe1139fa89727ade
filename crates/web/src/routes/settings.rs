//! Settings routes.

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use artify_core::profile::{PasswordChange, Preferences};

use crate::db::UserRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::routes::profile::load_user;
use crate::services::AuthService;
use crate::state::AppState;

/// POST /settings/password
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(change): Json<PasswordChange>,
) -> Result<Json<Value>> {
    AuthService::new(state.pool())
        .change_password(current.id, &change)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Password updated successfully."
    })))
}

/// PUT /settings/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Preferences>> {
    let mut profile = load_user(&state, &current).await?.profile;
    profile.preferences = preferences;
    profile.updated_at = Some(Utc::now());
    let user = UserRepository::new(state.pool())
        .update_profile(current.id, &profile)
        .await?;
    Ok(Json(user.profile.preferences))
}
