//! Google Cloud Translation (v2 REST) client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GoogleCloudConfig;

const TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Errors that can occur when translating text.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response carried no translation.
    #[error("translation response was empty")]
    Empty,

    /// The API key cannot be sent as a header.
    #[error("invalid API key format")]
    InvalidApiKey,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Translation API client.
#[derive(Clone)]
pub struct TranslateClient {
    client: reqwest::Client,
}

impl TranslateClient {
    /// Create a new translation client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &GoogleCloudConfig, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .default_headers(google_headers(config).ok_or(TranslateError::InvalidApiKey)?)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Translate plain text into `target_language` (an ISO-639 code).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or no translation comes back.
    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(TRANSLATE_URL)
            .json(&TranslateRequest {
                q: text,
                target: target_language,
                format: "text",
            })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse = response.json().await?;
        first_translation(body)
    }
}

fn first_translation(body: TranslateResponse) -> Result<String, TranslateError> {
    body.data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or(TranslateError::Empty)
}

/// Default headers for Google Cloud REST calls authenticated by API key.
pub(crate) fn google_headers(config: &GoogleCloudConfig) -> Option<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "X-Goog-Api-Key",
        HeaderValue::from_str(config.api_key.expose_secret()).ok()?,
    );
    Some(headers)
}
