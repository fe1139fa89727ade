//! Anthropic Messages API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;

use super::error::{ApiErrorResponse, LlmError};
use super::types::{ChatRequest, ChatResponse, Message};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Per-call generation settings.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub system: Option<String>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            system: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }
}

impl ChatOptions {
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Claude API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Arguments
    ///
    /// * `config` - Claude API configuration containing API key and model
    /// * `timeout` - Upper bound on each request, connection included
    ///
    /// # Errors
    ///
    /// Returns `LlmError::InvalidApiKey` if the key cannot be sent as a header,
    /// or `LlmError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClaudeConfig, timeout: Duration) -> Result<Self, LlmError> {
        Self::with_endpoint(config, timeout, ANTHROPIC_API_URL)
    }

    /// Create a client that posts to `endpoint` instead of the public API.
    ///
    /// # Errors
    ///
    /// Same as [`ClaudeClient::new`].
    pub fn with_endpoint(
        config: &ClaudeConfig,
        timeout: Duration,
        endpoint: &str,
    ) -> Result<Self, LlmError> {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|_| LlmError::InvalidApiKey)?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
                endpoint: endpoint.to_owned(),
            }),
        })
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a chat request and get a complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, messages, options), fields(model = %self.inner.model))]
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: options.max_tokens,
            messages,
            system: options.system,
            temperature: options.temperature,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "Model reply received"
        );
        Ok(response)
    }

    /// Send one user prompt and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    pub async fn generate_text(
        &self,
        prompt: impl Into<String>,
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        let response = self.chat(vec![Message::user_text(prompt)], options).await?;
        Ok(response.text())
    }

    /// Handle a successful response.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatResponse, LlmError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| LlmError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> LlmError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return LlmError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return LlmError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => parse_error_body(&body),
            Err(e) => LlmError::Http(e),
        }
    }
}

fn parse_error_body(body: &str) -> LlmError {
    serde_json::from_str::<ApiErrorResponse>(body).map_or_else(
        |_| LlmError::Api {
            error_type: "unknown".to_string(),
            message: body.to_string(),
        },
        |api_error| LlmError::Api {
            error_type: api_error.error.error_type,
            message: api_error.error.message,
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config(key: &str) -> ClaudeConfig {
        ClaudeConfig {
            api_key: SecretString::from(key.to_string()),
            model: "claude-sonnet-4-20250514".to_string(),
        }
    }

    #[test]
    fn test_new_rejects_header_unsafe_key() {
        let result = ClaudeClient::new(&config("bad\nkey"), Duration::from_secs(5));
        assert!(matches!(result, Err(LlmError::InvalidApiKey)));
    }

    #[test]
    fn test_new_keeps_model() {
        let client = ClaudeClient::new(&config("sk-ant-test"), Duration::from_secs(5)).unwrap();
        assert_eq!(client.model(), "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_parse_error_body() {
        let err = parse_error_body(
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
        );
        assert!(matches!(err, LlmError::Api { ref error_type, .. } if error_type == "overloaded_error"));

        let err = parse_error_body("gateway timeout");
        assert!(matches!(err, LlmError::Api { ref message, .. } if message == "gateway timeout"));
    }

    #[test]
    fn test_options_builders() {
        let options = ChatOptions::default().with_temperature(0.3).with_max_tokens(300);
        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, 300);
        assert!(options.system.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let client = ClaudeClient::with_endpoint(
            &config("sk-ant-test"),
            Duration::from_secs(2),
            "http://127.0.0.1:9/v1/messages",
        )
        .unwrap();
        let err = client
            .generate_text("hello", ChatOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
