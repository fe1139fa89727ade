//! Google Cloud Text-to-Speech client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::translate::google_headers;
use crate::config::GoogleCloudConfig;

const SYNTHESIZE_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Errors that can occur when synthesizing speech.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response carried no audio.
    #[error("speech response contained no audio")]
    Empty,

    /// The API key cannot be sent as a header.
    #[error("invalid API key format")]
    InvalidApiKey,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    ssml_gender: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

impl<'a> SynthesizeRequest<'a> {
    fn new(text: &'a str, language_code: &'a str) -> Self {
        Self {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code,
                ssml_gender: "FEMALE",
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        }
    }
}

/// Text-to-speech API client.
#[derive(Clone)]
pub struct SpeechClient {
    client: reqwest::Client,
}

impl SpeechClient {
    /// Create a new speech client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &GoogleCloudConfig, timeout: Duration) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .default_headers(google_headers(config).ok_or(SpeechError::InvalidApiKey)?)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Synthesize MP3 audio with a female voice.
    ///
    /// Returns the audio as base64, as delivered by the API.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or no audio comes back.
    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn synthesize(&self, text: &str, language_code: &str) -> Result<String, SpeechError> {
        let response = self
            .client
            .post(SYNTHESIZE_URL)
            .json(&SynthesizeRequest::new(text, language_code))
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SynthesizeResponse = response.json().await?;
        if body.audio_content.is_empty() {
            return Err(SpeechError::Empty);
        }
        Ok(body.audio_content)
    }
}
