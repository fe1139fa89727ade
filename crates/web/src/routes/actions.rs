//! Generator form actions.
//!
//! Each action validates its form, runs one flow and answers HTTP 200 with
//! `{ form, status, result?, error? }`. Validation and provider failures
//! are reported in `status`/`error`, not in the status code.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
};

use artify_core::generation::{AdInput, AdOutput, StoryInput, StoryResult, TrendInput, TrendOutput};
use artify_core::lifecycle::{ActionState, Generation};
use artify_core::schema::{AdForm, GENERIC_VALIDATION_MESSAGE, StoryForm, TrendForm, UploadedImage};

use crate::error::{AppError, Result};
use crate::flows;
use crate::llm::LlmError;
use crate::state::AppState;

/// Shown when a failure carries no message of its own.
const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

fn provider_message(error: &LlmError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}

fn bad_multipart(error: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid form data: {}", error.body_text()))
}

/// Read the story form fields and the photo from a multipart body.
async fn read_story_form(
    mut multipart: Multipart,
) -> Result<(StoryForm, Option<UploadedImage>)> {
    let mut form = StoryForm::default();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_owned();
        if name == "productPhoto" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_owned();
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            // Browsers send an empty part when no file was chosen.
            if !bytes.is_empty() {
                photo = Some(UploadedImage {
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(bad_multipart)?;
        match name.as_str() {
            "productName" => form.product_name = value,
            "productDescription" => form.product_description = value,
            "artisanNotes" => form.artisan_notes = value,
            "regionalData" => form.regional_data = Some(value),
            "heritageData" => form.heritage_data = Some(value),
            _ => {}
        }
    }

    Ok((form, photo))
}

/// Generate a product story.
///
/// POST /actions/story (multipart)
pub async fn story(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ActionState<StoryForm, StoryResult>>> {
    let (form, photo) = read_story_form(multipart).await?;

    if let Err(errors) = form.validate(photo.as_ref()) {
        let failed = Generation::Idle.fail(StoryForm::summarize(&errors))?;
        return Ok(Json(ActionState::new(form, failed)));
    }
    let Some(photo) = photo else {
        let failed = Generation::Idle.fail(GENERIC_VALIDATION_MESSAGE)?;
        return Ok(Json(ActionState::new(form, failed)));
    };

    let submitting = Generation::Idle.submit()?;
    let product_image_uri = photo.to_data_uri().to_string();
    let input = StoryInput {
        product_name: form.product_name.clone(),
        product_description: form.product_description.clone(),
        artisan_notes: form.artisan_notes.clone(),
        product_photo_data_uri: product_image_uri.clone(),
        regional_data: form.regional_data.clone(),
        heritage_data: form.heritage_data.clone(),
    };

    let finished = match flows::story::generate(state.claude(), &input).await {
        Ok(story) => submitting.succeed(StoryResult {
            story,
            product_image_uri,
        })?,
        Err(e) => {
            tracing::error!(error = %e, "Story generation failed");
            submitting.fail(provider_message(&e))?
        }
    };

    Ok(Json(ActionState::new(form, finished)))
}

/// Suggest trends and keywords.
///
/// POST /actions/trends
pub async fn trends(
    State(state): State<AppState>,
    Json(form): Json<TrendForm>,
) -> Result<Json<ActionState<TrendForm, TrendOutput>>> {
    if form.validate().is_err() {
        let failed = Generation::Idle.fail(GENERIC_VALIDATION_MESSAGE)?;
        return Ok(Json(ActionState::new(form, failed)));
    }

    let submitting = Generation::Idle.submit()?;
    let input = TrendInput {
        product_type: form.product_type.clone(),
        artisan_region: form.artisan_region.clone(),
    };

    let finished = match flows::trends::suggest(state.claude(), &input).await {
        Ok(output) => submitting.succeed(output)?,
        Err(e) => {
            tracing::error!(error = %e, "Trend suggestion failed");
            submitting.fail(provider_message(&e))?
        }
    };

    Ok(Json(ActionState::new(form, finished)))
}

/// Generate ad creatives. Provider failures still succeed with fallback copy.
///
/// POST /actions/ads
pub async fn ads(
    State(state): State<AppState>,
    Json(form): Json<AdForm>,
) -> Result<Json<ActionState<AdForm, AdOutput>>> {
    let image = match form.validate() {
        Ok(image) => image,
        Err(_) => {
            let failed = Generation::Idle.fail(GENERIC_VALIDATION_MESSAGE)?;
            return Ok(Json(ActionState::new(form, failed)));
        }
    };

    let submitting = Generation::Idle.submit()?;
    let input = AdInput {
        product_story: form.product_story.clone(),
        artisan_preferences: form.artisan_preferences.clone(),
        product_image_uri: image.to_string(),
    };
    let output = flows::ads::generate(state.claude(), &input).await;

    Ok(Json(ActionState::new(form, submitting.succeed(output)?)))
}
