//! Integration tests for ArtifyAI.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (core behaviour across modules)
//! cargo test -p artify-integration-tests
//!
//! # Live tests against a running server and database
//! artify-cli migrate
//! cargo run -p artify-web &
//! cargo test -p artify-integration-tests -- --ignored
//! ```
//!
//! # Test Files
//!
//! - `craft_score` - Pricing and sustainability heuristic properties
//! - `generation` - Action lifecycle, ad fallback and reply extraction
//! - `accounts` - Sign-up, sessions and the library (live)

use reqwest::Client;

/// Base URL of the running service (`ARTIFY_TEST_URL`).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ARTIFY_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client that keeps the session cookie between requests.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn session_client() -> reqwest::Result<Client> {
    Client::builder().cookie_store(true).build()
}

/// An email address no other test run has used.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}
