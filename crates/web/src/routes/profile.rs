//! Profile routes.

use axum::{Json, extract::State};
use chrono::Utc;

use artify_core::profile::{ProfileSetup, ProfileUpdate};

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, User};
use crate::routes::auth::SessionResponse;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// A signed-in user whose account is gone is a 404, not a login failure.
fn lookup_error(e: AuthError) -> AppError {
    match e {
        AuthError::UserNotFound => AppError::NotFound("User not found".to_string()),
        other => other.into(),
    }
}

pub(crate) async fn load_user(state: &AppState, current: &CurrentUser) -> Result<User> {
    AuthService::new(state.pool())
        .get_user(current.id)
        .await
        .map_err(lookup_error)
}

/// GET /profile
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<User>> {
    Ok(Json(load_user(&state, &current).await?))
}

/// Fill in the artisan details and mark the profile complete.
///
/// PUT /profile/setup
pub async fn setup(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(setup): Json<ProfileSetup>,
) -> Result<Json<SessionResponse>> {
    if setup.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required.".to_string()));
    }

    let mut profile = load_user(&state, &current).await?.profile;
    profile.complete_setup(setup, Utc::now());
    let user = UserRepository::new(state.pool())
        .update_profile(current.id, &profile)
        .await?;

    tracing::info!(user_id = %user.id, "Profile setup completed");
    Ok(Json(SessionResponse {
        route: user.landing_route(),
        user: Some(user),
    }))
}

/// Merge the provided fields into the profile.
///
/// PATCH /profile
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>> {
    let mut profile = load_user(&state, &current).await?.profile;
    profile.apply(update, Utc::now());
    let user = UserRepository::new(state.pool())
        .update_profile(current.id, &profile)
        .await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn test_missing_account_is_not_found() {
        let response = lookup_error(AuthError::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_lookup_failures_keep_their_status() {
        let response = lookup_error(AuthError::PasswordHash).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
