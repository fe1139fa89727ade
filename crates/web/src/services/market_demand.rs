//! Market-demand lookup: an existence check, then a demand analysis.

use serde::Serialize;
use thiserror::Error;

use artify_core::json_extract::{ExtractError, extract_json};
use artify_core::market::{DemandAnalysis, ProductValidation};

use crate::llm::{ChatOptions, ClaudeClient, LlmError};

const VALIDATION_TEMPERATURE: f32 = 0.3;
const ANALYSIS_TEMPERATURE: f32 = 0.6;

/// Why a lookup did not produce a report.
#[derive(Debug, Error)]
pub enum MarketDemandError {
    /// The model does not believe the product exists.
    #[error("The product \"{name}\" does not appear to exist in the global market.")]
    UnknownProduct { name: String, reason: String },

    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model reply unusable: {0}")]
    Reply(#[from] ExtractError),
}

/// Market-demand response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDemandReport {
    pub product_name: String,
    pub validation: ProductValidation,
    pub data: DemandAnalysis,
}

#[must_use]
pub fn validation_prompt(name: &str) -> String {
    format!(
        "You are a global market research AI. Check if the product \"{name}\" exists as a real \
         consumer or industrial product. Respond ONLY in JSON: {{\"exists\": true/false, \
         \"confidence\": 1-10, \"reason\": \"short reason explaining your decision\"}}"
    )
}

#[must_use]
pub fn analysis_prompt(name: &str) -> String {
    format!(
        "You are an expert market analyst. Analyze the global market demand trend for \"{name}\". \
         Respond ONLY in JSON: {{\
         \"historical_data\": {{\"2019\": number, \"2020\": number, \"2021\": number, \
         \"2022\": number, \"2023\": number, \"2024\": number}}, \
         \"forecast_data\": {{\"2025\": number, \"2026\": number, \"2027\": number, \
         \"2028\": number, \"2029\": number}}, \
         \"competitors\": [\"list of competitors\"], \
         \"regions\": [\"top 5 regions with high demand\"], \
         \"insights\": \"short summary of the market trend\", \
         \"tips\": [\"5 short practical business tips\"]}}"
    )
}

/// Check that `name` is a real product and analyse its demand.
///
/// `name` must already be trimmed and long enough.
///
/// # Errors
///
/// Returns `MarketDemandError::UnknownProduct` when the existence check
/// fails, or a model/reply error from either call.
#[tracing::instrument(skip(client))]
pub async fn lookup(client: &ClaudeClient, name: &str) -> Result<MarketDemandReport, MarketDemandError> {
    let reply = client
        .generate_text(
            validation_prompt(name),
            ChatOptions::default().with_temperature(VALIDATION_TEMPERATURE),
        )
        .await?;
    let validation: ProductValidation = extract_json(&reply)?;

    if !validation.accepted() {
        tracing::info!(confidence = validation.confidence, "Product rejected as unknown");
        return Err(MarketDemandError::UnknownProduct {
            name: name.to_string(),
            reason: validation.reason,
        });
    }

    let reply = client
        .generate_text(
            analysis_prompt(name),
            ChatOptions::default().with_temperature(ANALYSIS_TEMPERATURE),
        )
        .await?;
    let data: DemandAnalysis = extract_json(&reply)?;
    let missing = data.missing_years();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Demand analysis is missing years");
    }

    Ok(MarketDemandReport {
        product_name: name.to_string(),
        validation,
        data,
    })
}
