//! Validation for the three generator forms.
//!
//! Each form validates every field and reports the first problem per field,
//! keyed by the field's wire name. Text lengths are counted in characters
//! after trimming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::image::{DataUri, ImageError, check_image};

/// Message shown when a form fails for reasons other than the photo.
pub const GENERIC_VALIDATION_MESSAGE: &str = "Validation failed. Please check your inputs.";

const PHOTO_REQUIRED: &str = "Product photo is required.";
const IMAGE_REQUIRED: &str = "Product image is required.";

/// Field name to first error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    fn min_chars(&mut self, field: &'static str, value: &str, min: usize, label: &str) {
        if value.trim().chars().count() < min {
            self.add(field, format!("{label} must be at least {min} characters."));
        }
    }

    /// Error for one field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// An image received as a multipart file.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Inline the image as a data URI for the model provider.
    #[must_use]
    pub fn to_data_uri(&self) -> DataUri {
        DataUri::encode(&self.content_type, &self.bytes)
    }
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Product story generator form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryForm {
    pub product_name: String,
    pub product_description: String,
    pub artisan_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heritage_data: Option<String>,
}

impl StoryForm {
    /// Validate the text fields together with the uploaded photo.
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self, photo: Option<&UploadedImage>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.min_chars("productName", &self.product_name, 3, "Product name");
        errors.min_chars(
            "productDescription",
            &self.product_description,
            20,
            "Product description",
        );
        match photo {
            None => errors.add("productPhoto", PHOTO_REQUIRED),
            Some(image) => {
                if let Err(e) = check_image(image.bytes.len(), &image.content_type) {
                    errors.add("productPhoto", e.to_string());
                }
            }
        }
        errors.into_result()
    }

    /// The single message shown for a failed story form: the photo problem
    /// if there is one, otherwise the generic message.
    #[must_use]
    pub fn summarize(errors: &FieldErrors) -> String {
        errors
            .get("productPhoto")
            .unwrap_or(GENERIC_VALIDATION_MESSAGE)
            .to_owned()
    }
}

/// Trend finder form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendForm {
    pub product_type: String,
    pub artisan_region: String,
}

impl TrendForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.min_chars("productType", &self.product_type, 3, "Product type");
        errors.min_chars("artisanRegion", &self.artisan_region, 3, "Artisan region");
        errors.into_result()
    }
}

/// Ad creative generator form. The image arrives as a data URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdForm {
    pub product_story: String,
    pub artisan_preferences: String,
    #[serde(skip_serializing)]
    pub product_image: String,
}

impl AdForm {
    /// Validate the form and return the parsed image on success.
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<DataUri, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.min_chars("productStory", &self.product_story, 50, "Product story");
        errors.min_chars(
            "artisanPreferences",
            &self.artisan_preferences,
            10,
            "Artisan preferences",
        );

        let image = if self.product_image.trim().is_empty() {
            errors.add("productImage", IMAGE_REQUIRED);
            None
        } else {
            match DataUri::parse(&self.product_image) {
                Ok(uri) => match uri.check() {
                    Ok(()) => Some(uri),
                    Err(e) => {
                        errors.add("productImage", e.to_string());
                        None
                    }
                },
                Err(_) => {
                    errors.add("productImage", ImageError::UnsupportedType.to_string());
                    None
                }
            }
        };

        match image {
            Some(uri) if errors.is_empty() => Ok(uri),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::image::MAX_IMAGE_SIZE;

    fn photo(content_type: &str, len: usize) -> UploadedImage {
        UploadedImage {
            content_type: content_type.to_owned(),
            bytes: vec![0; len],
        }
    }

    fn story() -> StoryForm {
        StoryForm {
            product_name: "Blue pottery vase".to_owned(),
            product_description: "Hand-thrown vase glazed in Jaipur blue.".to_owned(),
            ..StoryForm::default()
        }
    }

    #[test]
    fn test_story_valid() {
        assert!(story().validate(Some(&photo("image/jpeg", 1024))).is_ok());
    }

    #[test]
    fn test_story_short_fields() {
        let form = StoryForm {
            product_name: "ab".to_owned(),
            product_description: "too short".to_owned(),
            ..StoryForm::default()
        };
        let errors = form.validate(Some(&photo("image/png", 10))).unwrap_err();
        assert_eq!(
            errors.get("productName"),
            Some("Product name must be at least 3 characters.")
        );
        assert_eq!(
            errors.get("productDescription"),
            Some("Product description must be at least 20 characters.")
        );
        assert_eq!(StoryForm::summarize(&errors), GENERIC_VALIDATION_MESSAGE);
    }

    #[test]
    fn test_story_photo_error_wins_summary() {
        let errors = story()
            .validate(Some(&photo("image/png", MAX_IMAGE_SIZE + 1)))
            .unwrap_err();
        assert_eq!(StoryForm::summarize(&errors), "Max image size is 5MB.");

        let errors = story().validate(Some(&photo("image/gif", 10))).unwrap_err();
        assert_eq!(
            StoryForm::summarize(&errors),
            ".jpg, .jpeg, .png and .webp files are accepted."
        );

        let errors = story().validate(None).unwrap_err();
        assert_eq!(StoryForm::summarize(&errors), "Product photo is required.");
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let form = TrendForm {
            product_type: "  a ".to_owned(),
            artisan_region: "Kutch".to_owned(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("productType").is_some());
    }

    #[test]
    fn test_lengths_count_characters() {
        let form = TrendForm {
            product_type: "जूट".to_owned(),
            artisan_region: "भुज".to_owned(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_ad_form() {
        let valid = AdForm {
            product_story: "A".repeat(50),
            artisan_preferences: "Young urban buyers".to_owned(),
            product_image: "data:image/png;base64,iVBORw0KGgo=".to_owned(),
        };
        let uri = valid.validate().unwrap();
        assert_eq!(uri.mime(), "image/png");

        let missing = AdForm {
            product_image: String::new(),
            ..valid.clone()
        };
        assert_eq!(
            missing.validate().unwrap_err().get("productImage"),
            Some("Product image is required.")
        );

        let wrong_type = AdForm {
            product_image: "data:image/gif;base64,R0lGOD==".to_owned(),
            ..valid
        };
        assert!(wrong_type.validate().unwrap_err().get("productImage").is_some());
    }

    #[test]
    fn test_ad_form_serialization_omits_image() {
        let form = AdForm {
            product_story: "story".to_owned(),
            artisan_preferences: "prefs".to_owned(),
            product_image: "data:image/png;base64,AAAA".to_owned(),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("productImage").is_none());
        assert_eq!(json["productStory"], "story");
    }
}
