//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (database reachable)
//!
//! # Accounts
//! POST /auth/signup            - Create account, sign in, send welcome mail
//! POST /auth/login             - Sign in
//! POST /auth/logout            - Sign out
//! GET  /api/session            - Current user and landing route
//!
//! # Profile & settings (requires auth)
//! GET   /profile               - Current profile
//! PUT   /profile/setup         - Complete profile setup
//! PATCH /profile               - Partial profile update
//! POST  /settings/password     - Change password
//! PUT   /settings/preferences  - Story tone and ad style
//!
//! # Library (requires auth)
//! GET  /library?type=          - Saved items, newest first
//! POST /library                - Save an item
//!
//! # Generator actions
//! POST /actions/story          - Product story (multipart)
//! POST /actions/trends         - Trends and SEO keywords
//! POST /actions/ads            - Ad creatives
//!
//! # Auxiliary API
//! POST /api/craft-score        - Pricing and sustainability score
//! POST /api/market-demand      - Market demand report
//! POST /api/translate          - Translation with model polish
//! POST /api/speech             - Text to speech with caption
//! POST /api/send-welcome       - Welcome email
//! POST /api/upload             - Profile picture upload (requires auth)
//!
//! # Media
//! GET  /media/{*key}           - Signed object download
//! ```

pub mod actions;
pub mod api;
pub mod auth;
pub mod library;
pub mod media;
pub mod profile;
pub mod settings;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the profile and settings routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::show).patch(profile::update))
        .route("/profile/setup", put(profile::setup))
        .route("/settings/password", post(settings::change_password))
        .route("/settings/preferences", put(settings::update_preferences))
}

/// Create the generator action routes router.
pub fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/story", post(actions::story))
        .route("/trends", post(actions::trends))
        .route("/ads", post(actions::ads))
}

/// Create the auxiliary API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(auth::current))
        .route("/craft-score", post(api::craft_score))
        .route("/market-demand", post(api::market_demand))
        .route("/translate", post(api::translate))
        .route("/speech", post(api::speech))
        .route("/send-welcome", post(api::send_welcome))
        .route("/upload", post(api::upload))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/auth", auth_routes())
        .merge(profile_routes())
        .route("/library", get(library::index).post(library::create))
        .nest("/actions", action_routes())
        .nest("/api", api_routes())
        .route("/media/{*key}", get(media::show))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
