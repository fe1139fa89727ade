//! Saved generation items (the user's library).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::image::DataUri;
use crate::types::SavedItemId;

/// Title used when none is given.
pub const DEFAULT_TITLE: &str = "Untitled Story";

/// Image shown when an item has no usable image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://picsum.photos/seed/artify-default/600/400";

/// Image URLs at or above this length are not stored.
pub const MAX_IMAGE_URL_LEN: usize = 500;

/// What was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedItemKind {
    Story,
    Trend,
    Ad,
}

impl SavedItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Trend => "trend",
            Self::Ad => "ad",
        }
    }

    /// Parse the stored column value.
    #[must_use]
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "story" => Some(Self::Story),
            "trend" => Some(Self::Trend),
            "ad" => Some(Self::Ad),
            _ => None,
        }
    }
}

impl fmt::Display for SavedItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored content of a saved item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedContent {
    pub title: String,
    pub image_url: String,
    pub short: String,
    pub long: String,
}

/// A saved item as listed in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: SavedItemId,
    #[serde(rename = "type")]
    pub kind: SavedItemKind,
    pub content: SavedContent,
    pub created_at: DateTime<Utc>,
}

/// Content as submitted by the browser; every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmittedContent {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub short: Option<String>,
    pub long: Option<String>,
}

/// What to do with the submitted image before storing the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePlan {
    /// Store this URL as is.
    Keep(String),
    /// Upload the inline image and store its download URL. Only images
    /// that pass [`DataUri::check`] are uploaded.
    Upload(DataUri),
    /// Store the placeholder.
    Placeholder,
}

impl ImagePlan {
    /// Decide how to persist a submitted image reference.
    #[must_use]
    pub fn for_submitted(image: Option<&str>) -> Self {
        let Some(image) = image.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Placeholder;
        };
        if image.starts_with("data:") {
            return match DataUri::parse(image) {
                Ok(uri) if uri.check().is_ok() => Self::Upload(uri),
                _ => Self::Placeholder,
            };
        }
        if image.len() < MAX_IMAGE_URL_LEN {
            Self::Keep(image.to_owned())
        } else {
            Self::Placeholder
        }
    }
}

impl SubmittedContent {
    /// Fill defaults, using `image_url` as the resolved image.
    #[must_use]
    pub fn into_content(self, image_url: String) -> SavedContent {
        SavedContent {
            title: self
                .title
                .map(|t| t.trim().to_owned())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            image_url,
            short: self.short.unwrap_or_default(),
            long: self.long.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let content = SubmittedContent::default().into_content(PLACEHOLDER_IMAGE_URL.to_owned());
        assert_eq!(content.title, "Untitled Story");
        assert_eq!(content.short, "");
        assert_eq!(content.image_url, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_image_plan() {
        assert_eq!(ImagePlan::for_submitted(None), ImagePlan::Placeholder);
        assert_eq!(ImagePlan::for_submitted(Some("  ")), ImagePlan::Placeholder);
        assert_eq!(
            ImagePlan::for_submitted(Some("https://cdn.example.com/a.jpg")),
            ImagePlan::Keep("https://cdn.example.com/a.jpg".to_owned())
        );
        let long_url = format!("https://example.com/{}", "a".repeat(MAX_IMAGE_URL_LEN));
        assert_eq!(
            ImagePlan::for_submitted(Some(&long_url)),
            ImagePlan::Placeholder
        );
        assert!(matches!(
            ImagePlan::for_submitted(Some("data:image/png;base64,AAAA")),
            ImagePlan::Upload(_)
        ));
        assert_eq!(
            ImagePlan::for_submitted(Some("data:broken")),
            ImagePlan::Placeholder
        );
    }

    #[test]
    fn test_inline_image_must_be_an_accepted_image() {
        // <script>alert(1)</script>
        let html = "data:text/html;base64,PHNjcmlwdD5hbGVydCgxKTwvc2NyaXB0Pg==";
        assert_eq!(ImagePlan::for_submitted(Some(html)), ImagePlan::Placeholder);
        assert_eq!(
            ImagePlan::for_submitted(Some("data:image/svg+xml;base64,PHN2Zz4=")),
            ImagePlan::Placeholder
        );

        let oversized = format!("data:image/png;base64,{}", "A".repeat(8 * 1024 * 1024));
        assert_eq!(
            ImagePlan::for_submitted(Some(&oversized)),
            ImagePlan::Placeholder
        );

        assert!(matches!(
            ImagePlan::for_submitted(Some("data:image/webp;base64,UklGRg==")),
            ImagePlan::Upload(uri) if uri.mime() == "image/webp"
        ));
    }

    #[test]
    fn test_kind_round_trips_through_db_text() {
        for kind in [SavedItemKind::Story, SavedItemKind::Trend, SavedItemKind::Ad] {
            assert_eq!(SavedItemKind::from_db(kind.as_str()), Some(kind));
        }
        assert_eq!(SavedItemKind::from_db("poem"), None);
    }

    #[test]
    fn test_item_wire_shape() {
        let item = SavedItem {
            id: SavedItemId::new(3),
            kind: SavedItemKind::Story,
            content: SubmittedContent {
                title: Some("Madhubani tote".to_owned()),
                ..SubmittedContent::default()
            }
            .into_content("https://x/y.jpg".to_owned()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "story");
        assert_eq!(json["content"]["title"], "Madhubani tote");
        assert_eq!(json["content"]["imageUrl"], "https://x/y.jpg");
        assert!(json.get("createdAt").is_some());
    }
}
