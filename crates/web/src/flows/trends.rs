//! `suggestProductTrendsPrompt`: product variations and SEO keywords.

use artify_core::generation::{TrendInput, TrendOutput};

use super::{RenderedPrompt, run_prompt};
use crate::llm::{ClaudeClient, LlmError};

pub const PROMPT_NAME: &str = "suggestProductTrendsPrompt";

const OUTPUT_SHAPE: &str = r#"{
  "suggestedVariations": ["string"],
  "seoKeywords": ["string"],
  "marketTrends": "string"
}"#;

#[must_use]
pub fn render(input: &TrendInput) -> String {
    format!(
        "You are an AI assistant that helps artisans identify product trends and SEO keywords.\n\n\
         Analyze Google Trends and shopping data based on the artisan's product type and region \
         to suggest new product variations and SEO-friendly keywords.\n\n\
         Artisan Product Type: {}\n\
         Artisan Region: {}\n\n\
         Provide a summary of the market trends that you see and use as the basis for the \
         suggestions.\n\
         Output suggested product variations and SEO keywords the artisan can use to improve \
         sales.\n\
         Ensure that the keywords are relevant to the region of the artisan.\n\n\
         Format your response as a JSON object that matches the schema exactly.\n\
         Do not include any other text besides the JSON object.\n",
        input.product_type, input.artisan_region
    )
}

/// Suggest trends for a product type and region.
///
/// # Errors
///
/// Returns any error from the model round trip.
pub async fn suggest(client: &ClaudeClient, input: &TrendInput) -> Result<TrendOutput, LlmError> {
    run_prompt(
        client,
        RenderedPrompt {
            name: PROMPT_NAME,
            text: render(input),
            image: None,
            output_shape: OUTPUT_SHAPE,
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let text = render(&TrendInput {
            product_type: "Jute bags".to_string(),
            artisan_region: "West Bengal".to_string(),
        });
        assert!(text.contains("Artisan Product Type: Jute bags\n"));
        assert!(text.contains("Artisan Region: West Bengal\n"));
        assert!(text.ends_with("besides the JSON object.\n"));
    }
}
