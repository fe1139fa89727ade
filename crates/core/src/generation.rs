//! Inputs and outputs of the three generation flows.
//!
//! Output types double as the JSON schema the model is asked to fill in,
//! so field names are the camelCase names the browser reads.

use serde::{Deserialize, Serialize};

/// Product story request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryInput {
    pub product_name: String,
    pub product_description: String,
    pub artisan_notes: String,
    /// `data:` URI of the product photo.
    #[serde(skip)]
    pub product_photo_data_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heritage_data: Option<String>,
}

/// Marketing content generated for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryOutput {
    pub product_description_short: String,
    pub product_description_long: String,
    pub social_media_post: String,
    pub provenance_card_content: String,
}

/// Story output plus the image that was described, for the result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResult {
    #[serde(flatten)]
    pub story: StoryOutput,
    pub product_image_uri: String,
}

/// Trend finder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInput {
    pub product_type: String,
    pub artisan_region: String,
}

/// Trend suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendOutput {
    pub suggested_variations: Vec<String>,
    pub seo_keywords: Vec<String>,
    pub market_trends: String,
}

/// Ad creative request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdInput {
    pub product_story: String,
    pub artisan_preferences: String,
    /// `data:` URI of the product image.
    #[serde(skip)]
    pub product_image_uri: String,
}

/// Ad creatives and campaign advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdOutput {
    pub youtube_short: String,
    pub instagram_reel: String,
    pub google_ad_banner: String,
    pub audience_targeting: String,
    pub budget_optimization: String,
}

const FALLBACK_EXCERPT_CHARS: usize = 60;

impl AdOutput {
    /// Deterministic creatives used when the model call fails.
    ///
    /// Every field is non-empty for any input.
    #[must_use]
    pub fn fallback(input: &AdInput) -> Self {
        let story_excerpt: String = input
            .product_story
            .chars()
            .take(FALLBACK_EXCERPT_CHARS)
            .collect();
        let prefs_excerpt: String = input
            .artisan_preferences
            .chars()
            .take(FALLBACK_EXCERPT_CHARS)
            .collect();
        let first_word = input.product_story.split(' ').next().unwrap_or_default();
        let audience = if input.artisan_preferences.is_empty() {
            "your target audience"
        } else {
            input.artisan_preferences.as_str()
        };

        Self {
            youtube_short: format!("✨ Showcasing your product: {story_excerpt}..."),
            instagram_reel: format!("🎬 Trendy reel idea for {prefs_excerpt}..."),
            google_ad_banner: format!("🛍️ {first_word} — the next must-have item!"),
            audience_targeting: format!("Ideal for {audience}."),
            budget_optimization: "Start small and increase spend based on engagement rates."
                .to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ad_input(story: &str, prefs: &str) -> AdInput {
        AdInput {
            product_story: story.to_owned(),
            artisan_preferences: prefs.to_owned(),
            product_image_uri: "data:image/png;base64,AAAA".to_owned(),
        }
    }

    #[test]
    fn test_fallback_fields() {
        let story = "Handwoven baskets from the Sundarbans, dyed with turmeric and indigo by a cooperative of twelve women.";
        let out = AdOutput::fallback(&ad_input(story, "Eco-conscious gift shoppers"));

        assert_eq!(
            out.youtube_short,
            format!("✨ Showcasing your product: {}...", &story[..60])
        );
        assert_eq!(
            out.instagram_reel,
            "🎬 Trendy reel idea for Eco-conscious gift shoppers..."
        );
        assert_eq!(out.google_ad_banner, "🛍️ Handwoven — the next must-have item!");
        assert_eq!(out.audience_targeting, "Ideal for Eco-conscious gift shoppers.");
    }

    #[test]
    fn test_fallback_complete_for_empty_input() {
        let out = AdOutput::fallback(&ad_input("", ""));
        for field in [
            &out.youtube_short,
            &out.instagram_reel,
            &out.google_ad_banner,
            &out.audience_targeting,
            &out.budget_optimization,
        ] {
            assert!(!field.is_empty());
        }
        assert_eq!(out.audience_targeting, "Ideal for your target audience.");
    }

    #[test]
    fn test_fallback_truncates_on_char_boundaries() {
        let story = "मिट्टी".repeat(30);
        let out = AdOutput::fallback(&ad_input(&story, "x"));
        let excerpt: String = story.chars().take(60).collect();
        assert!(out.youtube_short.contains(&excerpt));
    }

    #[test]
    fn test_story_result_flattens() {
        let result = StoryResult {
            story: StoryOutput {
                product_description_short: "s".into(),
                product_description_long: "l".into(),
                social_media_post: "p".into(),
                provenance_card_content: "c".into(),
            },
            product_image_uri: "data:image/png;base64,AA".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["productDescriptionShort"], "s");
        assert_eq!(json["productImageUri"], "data:image/png;base64,AA");
    }

    #[test]
    fn test_trend_output_requires_all_fields() {
        let partial = r#"{"suggestedVariations": ["tote"], "seoKeywords": []}"#;
        assert!(serde_json::from_str::<TrendOutput>(partial).is_err());
    }
}
