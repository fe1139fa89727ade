//! Generation request lifecycle, ad fallback and model reply parsing.

#![allow(clippy::unwrap_used)]

use artify_core::generation::{AdInput, AdOutput, TrendOutput};
use artify_core::json_extract::extract_json;
use artify_core::lifecycle::{ActionState, Generation};
use artify_core::schema::{AdForm, GENERIC_VALIDATION_MESSAGE, TrendForm};

#[test]
fn test_trend_action_from_reply_to_wire_state() {
    let form = TrendForm {
        product_type: "Jute bags".to_string(),
        artisan_region: "West Bengal".to_string(),
    };
    assert!(form.validate().is_ok());

    let reply = "Here you go:\n```json\n{\"suggestedVariations\": [\"Printed jute tote\"], \
                 \"seoKeywords\": [\"jute tote\", \"eco bag\"], \
                 \"marketTrends\": \"Eco-friendly totes are rising.\"}\n```";
    let output: TrendOutput = extract_json(reply).unwrap();

    let submitting = Generation::Idle.submit().unwrap();
    let state = ActionState::new(form, submitting.succeed(output).unwrap());
    let value = serde_json::to_value(&state).unwrap();

    assert_eq!(value["status"], "succeeded");
    assert_eq!(value["form"]["artisanRegion"], "West Bengal");
    assert_eq!(value["result"]["seoKeywords"][1], "eco bag");
    assert!(value.get("error").is_none());
}

#[test]
fn test_finished_requests_reject_further_transitions() {
    let output = TrendOutput {
        suggested_variations: vec!["Dyed jute".to_string()],
        seo_keywords: Vec::new(),
        market_trends: String::new(),
    };
    let done = Generation::<TrendOutput>::Idle
        .submit()
        .unwrap()
        .fail("Model unavailable")
        .unwrap();
    assert!(done.is_finished());
    assert!(done.clone().succeed(output).is_err());
    assert!(done.clone().fail("again").is_err());
    assert!(done.submit().is_err());
}

#[test]
fn test_invalid_ad_form_fails_before_generation() {
    let form = AdForm {
        product_story: "Too short".to_string(),
        artisan_preferences: "Gift buyers".to_string(),
        product_image: "data:image/gif;base64,R0lGOD".to_string(),
    };
    let errors = form.validate().unwrap_err();
    assert!(errors.get("productStory").is_some());
    assert!(errors.get("productImage").is_some());

    let failed = Generation::<AdOutput>::Idle
        .fail(GENERIC_VALIDATION_MESSAGE)
        .unwrap();
    let value = serde_json::to_value(ActionState::new(form, failed)).unwrap();
    assert_eq!(value["status"], "failed");
    assert_eq!(value["error"], GENERIC_VALIDATION_MESSAGE);
    assert!(value["form"].get("productImage").is_none());
}

#[test]
fn test_ad_fallback_is_complete() {
    let long_story = "मिट्टी के दीये ".repeat(20);
    for (story, prefs) in [
        ("", ""),
        ("Terracotta", "Home decor lovers"),
        (long_story.as_str(), "त्योहार"),
    ] {
        let output = AdOutput::fallback(&AdInput {
            product_story: story.to_string(),
            artisan_preferences: prefs.to_string(),
            product_image_uri: String::new(),
        });
        for field in [
            &output.youtube_short,
            &output.instagram_reel,
            &output.google_ad_banner,
            &output.audience_targeting,
            &output.budget_optimization,
        ] {
            assert!(!field.is_empty());
        }
    }
}

#[test]
fn test_reply_without_json_is_rejected() {
    assert!(extract_json::<TrendOutput>("I cannot help with that.").is_err());
}
