//! Session middleware configuration.
//!
//! `PostgreSQL`-backed sessions in `artify.session` using tower-sessions.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ArtifyConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "artify_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

const SESSION_SCHEMA: &str = "artify";
const SESSION_TABLE: &str = "session";

/// The session store rejected its schema or table name.
#[derive(Debug, thiserror::Error)]
#[error("invalid session store location: {0}")]
pub struct SessionStoreError(String);

/// Create the session layer with `PostgreSQL` store.
///
/// The table is created by the `artify-cli migrate` migrations.
///
/// # Errors
///
/// Returns an error if the store rejects the schema or table name.
pub fn create_session_layer(
    pool: &PgPool,
    config: &ArtifyConfig,
) -> Result<SessionManagerLayer<PostgresStore>, SessionStoreError> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name(SESSION_SCHEMA)
        .map_err(SessionStoreError)?
        .with_table_name(SESSION_TABLE)
        .map_err(SessionStoreError)?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}
