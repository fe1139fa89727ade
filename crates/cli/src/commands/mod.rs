//! CLI command implementations.

pub mod migrate;
pub mod user;

/// Read the database URL the web service uses.
fn database_url() -> Option<secrecy::SecretString> {
    dotenvy::dotenv().ok();
    std::env::var("ARTIFY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(secrecy::SecretString::from)
}
