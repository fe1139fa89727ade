//! Pulling a JSON object out of free-form model output.
//!
//! Models often wrap the requested object in prose or a fenced block. The
//! candidate is the span from the first `{` to the last `}`; it must then
//! deserialize into the expected type, so stray braces in the prose fail
//! loudly instead of yielding garbage.

use serde::de::DeserializeOwned;

/// Why a reply could not be turned into the expected type.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("reply contains no JSON object")]
    NoObject,
    #[error("reply JSON does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// The substring from the first `{` to the last `}`, inclusive.
#[must_use]
pub fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Locate and deserialize the JSON object in `text`.
///
/// # Errors
///
/// [`ExtractError::NoObject`] when no braces are found,
/// [`ExtractError::Shape`] when the span is not valid JSON for `T`.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    let span = object_span(text).ok_or(ExtractError::NoObject)?;
    Ok(serde_json::from_str(span)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Verdict {
        exists: bool,
        confidence: u8,
    }

    #[test]
    fn test_object_in_prose() {
        let reply = "Sure! Here you go:\n```json\n{\"exists\": true, \"confidence\": 8}\n```\nHope that helps.";
        let verdict: Verdict = extract_json(reply).unwrap();
        assert_eq!(
            verdict,
            Verdict {
                exists: true,
                confidence: 8
            }
        );
    }

    #[test]
    fn test_nested_objects_keep_outer_span() {
        assert_eq!(object_span("x {\"a\": {\"b\": 1}} y"), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_no_braces() {
        assert!(matches!(
            extract_json::<Verdict>("I cannot answer that."),
            Err(ExtractError::NoObject)
        ));
        assert_eq!(object_span("} backwards {"), None);
    }

    #[test]
    fn test_stray_brace_in_prose_is_rejected() {
        let reply = "{\"exists\": true, \"confidence\": 9} note: use {braces} carefully";
        assert!(matches!(
            extract_json::<Verdict>(reply),
            Err(ExtractError::Shape(_))
        ));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(matches!(
            extract_json::<Verdict>("{\"exists\": \"maybe\"}"),
            Err(ExtractError::Shape(_))
        ));
    }
}
