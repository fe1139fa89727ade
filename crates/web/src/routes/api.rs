//! Auxiliary JSON endpoints.
//!
//! These answer failures with their own `{ "error": ... }` bodies and
//! status codes rather than the generic `AppError` mapping.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use artify_core::craft_score::CraftScoreInput;
use artify_core::image::check_image;
use artify_core::market::normalize_product_name;

use crate::error::report_error;
use crate::llm::ChatOptions;
use crate::middleware::RequireAuth;
use crate::services::craft_score;
use crate::services::market_demand::{self, MarketDemandError};
use crate::services::speech::DEFAULT_LANGUAGE_CODE;
use crate::services::storage::profile_pic_key;
use crate::state::AppState;

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Report a provider failure and answer 500 with `message` only.
fn provider_failure(
    error: &(dyn std::error::Error + 'static),
    context: &str,
    message: &str,
) -> Response {
    report_error(error, context);
    json_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Craft Score
// =============================================================================

/// Price, sustainability score and a model suggestion for a product.
///
/// POST /api/craft-score
pub async fn craft_score(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let input = match CraftScoreInput::from_json(body) {
        Ok(input) => input,
        Err(_) => return json_error(StatusCode::BAD_REQUEST, "Invalid request body."),
    };

    match craft_score::assess(state.claude(), &input).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            report_error(&e, "Craft Score calculation failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error during Craft Score calculation.",
            )
        }
    }
}

// =============================================================================
// Market demand
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDemandRequest {
    #[serde(default)]
    pub product_name: Option<String>,
}

/// Existence check and demand analysis for a product.
///
/// POST /api/market-demand
pub async fn market_demand(
    State(state): State<AppState>,
    Json(request): Json<MarketDemandRequest>,
) -> Response {
    let raw = request.product_name.unwrap_or_default();
    let Some(name) = normalize_product_name(&raw) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "Invalid product name. Please enter a valid product name.",
        );
    };

    match market_demand::lookup(state.claude(), name).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            if let MarketDemandError::UnknownProduct { reason, .. } = &e {
                let reason = if reason.trim().is_empty() {
                    "Unknown reason"
                } else {
                    reason.as_str()
                };
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": e.to_string(), "reason": reason })),
                )
                    .into_response();
            }
            report_error(&e, "Market demand analysis failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error during Market Demand analysis.",
            )
        }
    }
}

// =============================================================================
// Translation
// =============================================================================

const TRANSLATION_FAILED: &str = "Translation failed";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
}

/// Translate text, then ask the model to polish the translation.
///
/// POST /api/translate
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Response {
    let (Some(text), Some(target)) = (non_blank(request.text), non_blank(request.target_language))
    else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "Missing 'text' or 'targetLanguage' in request body.",
        );
    };
    let Some(client) = state.translate() else {
        tracing::error!("Translation requested but GOOGLE_CLOUD_API_KEY is not set");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, TRANSLATION_FAILED);
    };

    let translated = match client.translate(&text, &target).await {
        Ok(translated) => translated,
        Err(e) => {
            return provider_failure(&e, "Translation failed", TRANSLATION_FAILED);
        }
    };

    match state
        .claude()
        .generate_text(
            format!("Improve translation quality: {translated}"),
            ChatOptions::default(),
        )
        .await
    {
        Ok(enhancement) => Json(json!({
            "translatedText": translated,
            "aiEnhancement": enhancement,
        }))
        .into_response(),
        Err(e) => {
            provider_failure(&e, "Translation enhancement failed", TRANSLATION_FAILED)
        }
    }
}

// =============================================================================
// Speech
// =============================================================================

const SPEECH_FAILED: &str = "Speech synthesis failed";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

/// Synthesize speech and caption it.
///
/// POST /api/speech
pub async fn speech(State(state): State<AppState>, Json(request): Json<SpeechRequest>) -> Response {
    let Some(text) = non_blank(request.text) else {
        return json_error(StatusCode::BAD_REQUEST, "Missing text");
    };
    let language = non_blank(request.language_code)
        .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string());
    let Some(client) = state.speech() else {
        tracing::error!("Speech requested but GOOGLE_CLOUD_API_KEY is not set");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, SPEECH_FAILED);
    };

    let audio = match client.synthesize(&text, &language).await {
        Ok(audio) => audio,
        Err(e) => {
            return provider_failure(&e, "Speech synthesis failed", SPEECH_FAILED);
        }
    };

    match state
        .claude()
        .generate_text(
            format!("Summarize or caption this speech: {text}"),
            ChatOptions::default(),
        )
        .await
    {
        Ok(caption) => Json(json!({ "audioBase64": audio, "aiCaption": caption })).into_response(),
        Err(e) => {
            provider_failure(&e, "Speech caption failed", SPEECH_FAILED)
        }
    }
}

// =============================================================================
// Welcome email
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SendWelcomeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

const WELCOME_FAILED: &str = "Failed to send welcome email";

fn welcome_failure(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": error.into() })),
    )
        .into_response()
}

/// Send the welcome email.
///
/// POST /api/send-welcome
pub async fn send_welcome(
    State(state): State<AppState>,
    Json(request): Json<SendWelcomeRequest>,
) -> Response {
    let Some(email) = non_blank(request.email) else {
        return welcome_failure(StatusCode::BAD_REQUEST, "Missing email");
    };
    let Some(mailer) = state.email() else {
        tracing::error!("Welcome email requested but SMTP is not configured");
        return welcome_failure(StatusCode::INTERNAL_SERVER_ERROR, "Email is not configured");
    };

    match mailer
        .send_welcome_email(email.trim(), request.name.as_deref())
        .await
    {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            report_error(&e, "Welcome email failed");
            welcome_failure(StatusCode::INTERNAL_SERVER_ERROR, WELCOME_FAILED)
        }
    }
}

// =============================================================================
// Upload
// =============================================================================

const UPLOAD_REQUIRED: &str = "File and UID are required";

/// Store a profile picture for the signed-in user.
///
/// POST /api/upload (multipart: `file`, `uid`)
pub async fn upload(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Response {
    let mut file = None;
    let mut uid = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return json_error(StatusCode::BAD_REQUEST, e.body_text()),
        };
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                match field.bytes().await {
                    Ok(bytes) if !bytes.is_empty() => file = Some((content_type, bytes)),
                    Ok(_) => {}
                    Err(e) => return json_error(StatusCode::BAD_REQUEST, e.body_text()),
                }
            }
            "uid" => match field.text().await {
                Ok(text) => uid = non_blank(Some(text)),
                Err(e) => return json_error(StatusCode::BAD_REQUEST, e.body_text()),
            },
            _ => {}
        }
    }

    let (Some((content_type, bytes)), Some(uid)) = (file, uid) else {
        return json_error(StatusCode::BAD_REQUEST, UPLOAD_REQUIRED);
    };
    if uid.trim() != user.id.to_string() {
        return json_error(StatusCode::FORBIDDEN, "You can only upload your own files.");
    }
    if let Err(e) = check_image(bytes.len(), &content_type) {
        return json_error(StatusCode::BAD_REQUEST, e.to_string());
    }

    let key = profile_pic_key(user.id, &content_type, Utc::now());
    match state
        .storage()
        .store(&key, user.id, &content_type, &bytes)
        .await
    {
        Ok(url) => Json(json!({ "url": url })).into_response(),
        Err(e) => {
            report_error(&e, "Upload failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
