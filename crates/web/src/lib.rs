//! ArtifyAI web service library.
//!
//! The HTTP service for artisans: accounts and profiles, the three
//! generator actions (story, trends, ad creatives), the saved-item library
//! and the auxiliary APIs (craft score, market demand, translation, speech,
//! welcome email, uploads). The binary in `main.rs` only loads
//! configuration, sets up logging and serves [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod flows;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        self, HeaderValue,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::config::ArtifyConfig;
use crate::middleware::{SessionStoreError, create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Largest accepted request body. Fits a 5 MB image as base64 plus form fields.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

const CORS_METHODS: [http::Method; 5] = [
    http::Method::GET,
    http::Method::POST,
    http::Method::PUT,
    http::Method::PATCH,
    http::Method::DELETE,
];

/// CORS for the configured browser origins.
///
/// `*` allows any origin without credentials; otherwise only the listed
/// origins, with cookies.
fn build_cors(config: &ArtifyConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|s| s == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(CORS_METHODS)
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CORS_METHODS)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Build the application router with every layer except Sentry.
///
/// # Errors
///
/// Returns an error if the session store cannot be configured.
pub fn app(state: AppState) -> Result<Router, SessionStoreError> {
    let session_layer = create_session_layer(state.pool(), state.config())?;
    let cors = build_cors(state.config());

    Ok(routes::routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(session_layer)
        .layer(cors)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state))
}
