//! Craft Score: deterministic figures plus a model-written suggestion.

use serde::Serialize;

use artify_core::craft_score::{CraftScore, CraftScoreInput};

use crate::llm::{ChatOptions, ClaudeClient, LlmError};

/// Reply used when the model answers with nothing.
pub const NO_SUGGESTION: &str = "No suggestions generated.";

const SUGGESTION_MAX_TOKENS: u32 = 300;
const SUGGESTION_TEMPERATURE: f32 = 0.7;

/// Craft Score response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftScoreReport {
    #[serde(flatten)]
    pub score: CraftScore,
    pub suggestion: String,
}

/// Prompt asking for sustainability and pricing advice.
#[must_use]
pub fn suggestion_prompt(input: &CraftScoreInput) -> String {
    format!(
        "You are an AI sustainability and pricing assistant for handmade products.\n\
         Product Name: {}\n\
         Description: {}\n\
         Materials: {}\n\
         Origin: {}\n\
         Material Cost: ₹{}\n\
         Hours Spent: {}\n\
         Market Demand: {}\n\
         Energy Used: {} kWh\n\
         Production Time: {} hours\n\n\
         Suggest ways to improve sustainability, reduce carbon footprint, and optimize pricing.",
        input.product_name,
        input.product_desc,
        input.materials.join(", "),
        input.origin.as_str(),
        input.material_cost,
        input.hours_spent,
        input.demand_level,
        input.energy_used,
        input.production_hours,
    )
}

/// Compute the score and ask the model for a suggestion.
///
/// # Errors
///
/// Returns any error from the model call.
pub async fn assess(client: &ClaudeClient, input: &CraftScoreInput) -> Result<CraftScoreReport, LlmError> {
    let score = input.compute();
    let reply = client
        .generate_text(
            suggestion_prompt(input),
            ChatOptions::default()
                .with_max_tokens(SUGGESTION_MAX_TOKENS)
                .with_temperature(SUGGESTION_TEMPERATURE),
        )
        .await?;
    let suggestion = if reply.is_empty() {
        NO_SUGGESTION.to_string()
    } else {
        reply
    };
    Ok(CraftScoreReport { score, suggestion })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_prompt_lists_inputs() {
        let input = CraftScoreInput::from_json(json!({
            "productName": "Terracotta lamp",
            "materials": ["Clay", "Wood"],
            "origin": "Local",
            "materialCost": 500,
            "hoursSpent": "5",
            "demandLevel": "High",
            "energyUsed": 20,
            "productionHours": 5
        }))
        .unwrap();
        let prompt = suggestion_prompt(&input);
        assert!(prompt.contains("Product Name: Terracotta lamp\n"));
        assert!(prompt.contains("Description: A beautiful handmade item.\n"));
        assert!(prompt.contains("Materials: Clay, Wood\n"));
        assert!(prompt.contains("Material Cost: ₹500\n"));
        assert!(prompt.contains("Market Demand: High\n"));
        assert!(prompt.contains("Energy Used: 20 kWh\n"));
        assert!(prompt.ends_with("and optimize pricing."));
    }

    #[test]
    fn test_report_flattens_score() {
        let input = CraftScoreInput::from_json(json!({"materials": ["Clay"], "materialCost": 100})).unwrap();
        let report = CraftScoreReport {
            score: input.compute(),
            suggestion: NO_SUGGESTION.to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("suggestedPrice").is_some());
        assert!(json.get("negotiationRange").is_some());
        assert_eq!(json["suggestion"], NO_SUGGESTION);
    }
}
