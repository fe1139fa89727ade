//! `generateProductStoryPrompt`: marketing copy for a handmade product.

use std::fmt::Write as _;

use artify_core::generation::{StoryInput, StoryOutput};

use super::{RenderedPrompt, prompt_image, run_prompt};
use crate::llm::{ClaudeClient, LlmError};

pub const PROMPT_NAME: &str = "generateProductStoryPrompt";

const OUTPUT_SHAPE: &str = r#"{
  "productDescriptionShort": "string",
  "productDescriptionLong": "string",
  "socialMediaPost": "string",
  "provenanceCardContent": "string"
}"#;

/// Render the story prompt text.
#[must_use]
pub fn render(input: &StoryInput) -> String {
    let mut text = String::from(
        "You are an expert storyteller and marketing assistant for artisans.\n\n\
         You will be given details about a handmade product. Your task is to generate \
         compelling marketing content that tells the product's story.\n\n\
         Here are the details for the product:\n",
    );
    let _ = writeln!(text, "- Name: {}", input.product_name);
    let _ = writeln!(text, "- Core Details: {}", input.product_description);
    let _ = writeln!(text, "- Artisan's Notes: {}", input.artisan_notes);
    if let Some(regional) = non_blank(input.regional_data.as_deref()) {
        let _ = writeln!(text, "- Regional Information: {regional}");
    }
    if let Some(heritage) = non_blank(input.heritage_data.as_deref()) {
        let _ = writeln!(text, "- Heritage Information: {heritage}");
    }
    text.push_str(
        "- Product Photo: (attached image)\n\n\
         Based on these details, please generate the following:\n\
         1. **productDescriptionShort**: A catchy, one-sentence description.\n\
         2. **productDescriptionLong**: A detailed, evocative description that weaves in \
         details about the creation process, materials, and cultural significance.\n\
         3. **socialMediaPost**: A ready-to-use post for social media (like Instagram or \
         Facebook), including hashtags.\n\
         4. **provenanceCardContent**: A concise and inspiring story for a digital \
         provenance card that connects the customer to the artisan and the product's \
         origin. This should be a short paragraph.\n\n\
         Ensure the tone is authentic, warm, and highlights the unique value of a \
         handcrafted item.\n",
    );
    text
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Generate the story for a product.
///
/// # Errors
///
/// Returns `LlmError::InvalidImage` if the photo is not a data URI, or any
/// error from the model round trip.
pub async fn generate(client: &ClaudeClient, input: &StoryInput) -> Result<StoryOutput, LlmError> {
    let image = prompt_image(&input.product_photo_data_uri)?;
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> StoryInput {
        StoryInput {
            product_name: "Blue Pottery Vase".to_string(),
            product_description: "Hand-painted quartz vase from Jaipur".to_string(),
            artisan_notes: "Fired twice at low heat".to_string(),
            product_photo_data_uri: "data:image/png;base64,AAAA".to_string(),
            regional_data: None,
            heritage_data: None,
        }
    }

    #[test]
    fn test_render_includes_details() {
        let text = render(&input());
        assert!(text.contains("- Name: Blue Pottery Vase\n"));
        assert!(text.contains("- Core Details: Hand-painted quartz vase from Jaipur\n"));
        assert!(text.contains("- Artisan's Notes: Fired twice at low heat\n"));
        assert!(text.contains("**provenanceCardContent**"));
        assert!(!text.contains("Regional Information"));
    }

    #[test]
    fn test_render_optional_context() {
        let mut input = input();
        input.regional_data = Some("Rajasthan".to_string());
        input.heritage_data = Some("   ".to_string());
        let text = render(&input);
        assert!(text.contains("- Regional Information: Rajasthan\n"));
        assert!(!text.contains("Heritage Information"));
    }
}
