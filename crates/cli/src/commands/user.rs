//! Account management commands.

use artify_web::services::{AuthError, AuthService};
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Missing environment variable: ARTIFY_DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create an account the same way sign-up does, without signing in or
/// sending the welcome email.
///
/// # Errors
///
/// Returns an error if the email is taken or invalid, or the password is too weak.
pub async fn create(email: &str, name: &str, password: &str) -> Result<(), UserError> {
    let database_url = super::database_url().ok_or(UserError::MissingDatabaseUrl)?;
    let pool = artify_web::db::create_pool(&database_url).await?;

    let user = AuthService::new(&pool).register(name, email, password).await?;
    tracing::info!(user_id = %user.id, "Created user {}", user.email);
    Ok(())
}
