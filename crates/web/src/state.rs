//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ArtifyConfig;
use crate::llm::{ClaudeClient, LlmError};
use crate::services::{
    EmailService, MediaStorage, SpeechClient, SpeechError, TranslateClient, TranslateError,
};

/// Error building one of the outbound clients.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("model client: {0}")]
    Llm(#[from] LlmError),
    #[error("translation client: {0}")]
    Translate(#[from] TranslateError),
    #[error("speech client: {0}")]
    Speech(#[from] SpeechError),
    #[error("email transport: {0}")]
    Email(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; nothing in it changes after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ArtifyConfig,
    pool: PgPool,
    claude: ClaudeClient,
    translate: Option<TranslateClient>,
    speech: Option<SpeechClient>,
    email: Option<EmailService>,
    storage: MediaStorage,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Translation, speech and email clients are only built when their
    /// configuration is present.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured client cannot be built.
    pub fn new(config: ArtifyConfig, pool: PgPool) -> Result<Self, StateError> {
        let claude = ClaudeClient::new(&config.claude, config.http_timeout)?;
        Self::with_claude(config, pool, claude)
    }

    /// Create state around an already built model client.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured client cannot be built.
    pub fn with_claude(
        config: ArtifyConfig,
        pool: PgPool,
        claude: ClaudeClient,
    ) -> Result<Self, StateError> {
        let translate = config
            .google
            .as_ref()
            .map(|google| TranslateClient::new(google, config.http_timeout))
            .transpose()?;
        let speech = config
            .google
            .as_ref()
            .map(|google| SpeechClient::new(google, config.http_timeout))
            .transpose()?;
        let email = config.email.as_ref().map(EmailService::new).transpose()?;
        let storage = MediaStorage::new(
            pool.clone(),
            config.storage_secret.clone(),
            &config.base_url,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                claude,
                translate,
                speech,
                email,
                storage,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ArtifyConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the model client.
    #[must_use]
    pub fn claude(&self) -> &ClaudeClient {
        &self.inner.claude
    }

    /// Translation client, if `GOOGLE_CLOUD_API_KEY` is set.
    #[must_use]
    pub fn translate(&self) -> Option<&TranslateClient> {
        self.inner.translate.as_ref()
    }

    /// Speech client, if `GOOGLE_CLOUD_API_KEY` is set.
    #[must_use]
    pub fn speech(&self) -> Option<&SpeechClient> {
        self.inner.speech.as_ref()
    }

    /// Email service, if SMTP is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }

    #[must_use]
    pub fn storage(&self) -> &MediaStorage {
        &self.inner.storage
    }
}
