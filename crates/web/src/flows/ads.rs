//! `adCreativesPrompt`: short ad creatives and campaign advice.
//!
//! Unlike the other flows this one never fails: any provider or reply
//! problem yields [`AdOutput::fallback`].

use artify_core::generation::{AdInput, AdOutput};

use super::{RenderedPrompt, prompt_image, run_prompt};
use crate::llm::{ClaudeClient, LlmError};

pub const PROMPT_NAME: &str = "adCreativesPrompt";

const OUTPUT_SHAPE: &str = r#"{
  "youtubeShort": "string",
  "instagramReel": "string",
  "googleAdBanner": "string",
  "audienceTargeting": "string",
  "budgetOptimization": "string"
}"#;

#[must_use]
pub fn render(input: &AdInput) -> String {
    format!(
        "You are a professional marketing copywriter.\n\
         Using the details below, generate three short ad creatives and marketing insights.\n\n\
         Product Story: {}\n\
         Artisan Preferences: {}\n\
         Product Image: (attached image)\n\n\
         Output structured results for:\n\
         - YouTube Short (engaging 10-15s caption)\n\
         - Instagram Reel (hook + short copy)\n\
         - Google Ad Banner (headline + subline)\n\
         - Audience Targeting (who to show this to)\n\
         - Budget Optimization (how to spend effectively)\n",
        input.product_story, input.artisan_preferences
    )
}

async fn try_generate(client: &ClaudeClient, input: &AdInput) -> Result<AdOutput, LlmError> {
    let image = prompt_image(&input.product_image_uri)?;
    run_prompt(
        client,
        RenderedPrompt {
            name: PROMPT_NAME,
            text: render(input),
            image: Some(image),
            output_shape: OUTPUT_SHAPE,
        },
    )
    .await
}

/// Generate ad creatives, falling back to canned copy on any failure.
pub async fn generate(client: &ClaudeClient, input: &AdInput) -> AdOutput {
    match try_generate(client, input).await {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(error = %e, "Ad creative generation failed, using fallback");
            AdOutput::fallback(input)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;
    use crate::config::ClaudeConfig;

    fn input() -> AdInput {
        AdInput {
            product_story: "Handwoven Pashmina shawl made by third-generation weavers in Srinagar"
                .to_string(),
            artisan_preferences: "Eco-conscious buyers".to_string(),
            product_image_uri: "data:image/jpeg;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn test_render() {
        let text = render(&input());
        assert!(text.contains("Product Story: Handwoven Pashmina shawl"));
        assert!(text.contains("Artisan Preferences: Eco-conscious buyers\n"));
        assert!(text.contains("- Budget Optimization (how to spend effectively)"));
    }

    #[tokio::test]
    async fn test_provider_failure_yields_fallback() {
        let config = ClaudeConfig {
            api_key: SecretString::from("sk-ant-test".to_string()),
            model: "claude-sonnet-4-20250514".to_string(),
        };
        let client = ClaudeClient::with_endpoint(
            &config,
            Duration::from_secs(2),
            "http://127.0.0.1:9/v1/messages",
        )
        .unwrap();

        let output = generate(&client, &input()).await;
        assert_eq!(output, AdOutput::fallback(&input()));
        assert_eq!(output.google_ad_banner, "🛍️ Handwoven — the next must-have item!");
    }
}
