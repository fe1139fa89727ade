//! Product images in transit.
//!
//! Browsers send images either as multipart files or as
//! `data:<mime>;base64,<payload>` strings. Both are checked against the same
//! size and MIME constraints before anything is sent to a model provider.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Largest accepted image, in bytes (5 MiB).
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// MIME types accepted for product photos.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Errors raised while reading a data URI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI is not base64 encoded")]
    NotBase64,
    #[error("data URI payload is not valid base64")]
    InvalidPayload,
}

/// Reasons an image is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("Max image size is 5MB.")]
    TooLarge,
    #[error(".jpg, .jpeg, .png and .webp files are accepted.")]
    UnsupportedType,
}

/// Check size and MIME type against the product-photo constraints.
///
/// # Errors
///
/// Size is checked first, then type.
pub fn check_image(size: usize, mime: &str) -> Result<(), ImageError> {
    if size > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge);
    }
    if !ACCEPTED_IMAGE_TYPES.contains(&mime.trim().to_ascii_lowercase().as_str()) {
        return Err(ImageError::UnsupportedType);
    }
    Ok(())
}

/// File extension used when storing an image of this MIME type.
#[must_use]
pub fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// A parsed `data:` URI holding base64 image bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct DataUri {
    mime: String,
    payload: String,
}

impl DataUri {
    /// Encode raw bytes.
    #[must_use]
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self {
            mime: mime.to_owned(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// Parse `data:<mime>[;<param>...];base64,<payload>`.
    ///
    /// The MIME type is everything before the first `;`; other parameters
    /// are dropped. The payload is not decoded here; see [`DataUri::decode`].
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is missing or `;base64` is not the
    /// last parameter.
    pub fn parse(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::NotBase64)?;
        let params = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::NotBase64)?;
        let mime = params.split(';').next().unwrap_or_default().trim();

        Ok(Self {
            mime: mime.to_ascii_lowercase(),
            payload: payload.to_owned(),
        })
    }

    /// The declared MIME type.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// The base64 payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Decoded size estimated from the payload length (`len * 3/4 - 2`).
    ///
    /// Matches what the ad form reports to users without decoding.
    #[must_use]
    pub fn estimated_size(&self) -> usize {
        (self.payload.len() * 3 / 4).saturating_sub(2)
    }

    /// Check the estimated size and declared type.
    ///
    /// # Errors
    ///
    /// See [`check_image`].
    pub fn check(&self) -> Result<(), ImageError> {
        check_image(self.estimated_size(), &self.mime)
    }

    /// Decode the payload to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DataUriError::InvalidPayload`] if the payload is not base64.
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        STANDARD
            .decode(self.payload.as_bytes())
            .map_err(|_| DataUriError::InvalidPayload)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

impl fmt::Debug for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads run to megabytes
        f.debug_struct("DataUri")
            .field("mime", &self.mime)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_display() {
        let uri = DataUri::encode("image/png", b"abc");
        assert_eq!(uri.to_string(), "data:image/png;base64,YWJj");
        assert_eq!(DataUri::parse(&uri.to_string()).unwrap(), uri);
    }

    #[test]
    fn test_parse_rejects_non_data_uris() {
        assert_eq!(
            DataUri::parse("https://example.com/a.png"),
            Err(DataUriError::MissingScheme)
        );
        assert_eq!(
            DataUri::parse("data:image/png,rawbytes"),
            Err(DataUriError::NotBase64)
        );
        assert_eq!(DataUri::parse("data:image/png"), Err(DataUriError::NotBase64));
    }

    #[test]
    fn test_parse_drops_mime_parameters() {
        let uri = DataUri::parse("data:image/png;name=pot.png;base64,AAAA").unwrap();
        assert_eq!(uri.mime(), "image/png");
        assert_eq!(uri.payload(), "AAAA");
        assert!(uri.check().is_ok());

        let uri = DataUri::parse("data:Image/JPEG;charset=binary;base64,AAAA").unwrap();
        assert_eq!(uri.mime(), "image/jpeg");

        assert_eq!(
            DataUri::parse("data:image/png;base64;name=pot.png,AAAA"),
            Err(DataUriError::NotBase64)
        );
    }

    #[test]
    fn test_estimated_size() {
        let uri = DataUri::parse("data:image/jpeg;base64,AAAAAAAA").unwrap();
        assert_eq!(uri.estimated_size(), 4);
        let empty = DataUri::parse("data:image/jpeg;base64,").unwrap();
        assert_eq!(empty.estimated_size(), 0);
    }

    #[test]
    fn test_check_type_and_size() {
        assert_eq!(check_image(10, "image/webp"), Ok(()));
        assert_eq!(check_image(10, "IMAGE/JPG"), Ok(()));
        assert_eq!(check_image(10, "image/gif"), Err(ImageError::UnsupportedType));
        assert_eq!(
            check_image(MAX_IMAGE_SIZE + 1, "image/png"),
            Err(ImageError::TooLarge)
        );
        assert_eq!(check_image(MAX_IMAGE_SIZE, "image/png"), Ok(()));
    }

    #[test]
    fn test_oversized_payload_fails_check() {
        let payload = "A".repeat(MAX_IMAGE_SIZE / 3 * 4 + 16);
        let uri = DataUri::parse(&format!("data:image/png;base64,{payload}")).unwrap();
        assert_eq!(uri.check(), Err(ImageError::TooLarge));
    }

    #[test]
    fn test_decode_invalid_payload() {
        let uri = DataUri::parse("data:image/png;base64,@@@").unwrap();
        assert_eq!(uri.decode(), Err(DataUriError::InvalidPayload));
    }

    #[test]
    fn test_debug_hides_payload() {
        let uri = DataUri::encode("image/png", &[0u8; 32]);
        let debug = format!("{uri:?}");
        assert!(debug.contains("payload_len"));
        assert!(!debug.contains("AAAA"));
    }
}
