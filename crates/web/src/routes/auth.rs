//! Account routes: sign-up, login, logout and the current session.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use artify_core::profile::{LOGIN_ROUTE, PROFILE_SETUP_ROUTE, landing_route};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::AuthService;
use crate::state::AppState;

/// Sign-up request body.
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in user and where the browser should go next.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
    pub route: &'static str,
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session error: {e}"))
}

async fn sign_in(session: &Session, user: &User) -> Result<()> {
    set_current_user(session, &CurrentUser::from(user))
        .await
        .map_err(session_error)?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Create an account, sign it in and send the welcome email.
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&request.name, &request.email, &request.password)
        .await?;
    sign_in(&session, &user).await?;

    if let Some(mailer) = state.email() {
        let name = Some(user.profile.name.as_str()).filter(|n| !n.is_empty());
        if let Err(e) = mailer.send_welcome_email(user.email.as_str(), name).await {
            tracing::warn!(error = %e, user_id = %user.id, "Welcome email failed");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user: Some(user),
            route: PROFILE_SETUP_ROUTE,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let user = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;
    sign_in(&session, &user).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(SessionResponse {
        route: user.landing_route(),
        user: Some(user),
    }))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<SessionResponse>> {
    clear_current_user(&session).await.map_err(session_error)?;
    clear_sentry_user();
    Ok(Json(SessionResponse {
        user: None,
        route: LOGIN_ROUTE,
    }))
}

/// The current user, if any, and their landing route.
///
/// GET /api/session
pub async fn current(
    State(state): State<AppState>,
    OptionalAuth(current): OptionalAuth,
) -> Result<Json<SessionResponse>> {
    let user = match current {
        Some(current) => crate::db::UserRepository::new(state.pool())
            .get_by_id(current.id)
            .await?,
        None => None,
    };

    Ok(Json(SessionResponse {
        route: landing_route(user.as_ref().map(|u| &u.profile)),
        user,
    }))
}
