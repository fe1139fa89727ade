//! Object storage for uploaded images.
//!
//! Objects live in `artify.objects` and are served from `/media/{key}`.
//! Download URLs carry an expiry and an HMAC-SHA256 signature over
//! `key:expires`, so a URL can be handed out without a session.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use sqlx::PgPool;
use thiserror::Error;

use artify_core::UserId;
use artify_core::image::{DataUri, DataUriError, extension_for};

use crate::db::{ObjectRepository, RepositoryError, StoredObject};

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a signed download URL (ten years).
const SIGNED_URL_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Errors from the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("invalid inline image: {0}")]
    InvalidImage(#[from] DataUriError),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("signed URL expired")]
    Expired,
}

/// Key for an image attached to a saved library item.
#[must_use]
pub fn library_image_key(owner: UserId, mime: &str, now: DateTime<Utc>) -> String {
    format!(
        "users/{owner}/images/{}.{}",
        now.timestamp_millis(),
        extension_for(mime)
    )
}

/// Key for an uploaded profile picture.
#[must_use]
pub fn profile_pic_key(owner: UserId, mime: &str, now: DateTime<Utc>) -> String {
    format!(
        "profile_pics/{owner}_{}.{}",
        now.timestamp_millis(),
        extension_for(mime)
    )
}

/// Signed-URL object store.
#[derive(Clone)]
pub struct MediaStorage {
    pool: PgPool,
    secret: SecretString,
    base_url: String,
}

impl MediaStorage {
    #[must_use]
    pub fn new(pool: PgPool, secret: SecretString, base_url: &str) -> Self {
        Self {
            pool,
            secret,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Store bytes under `key` and return a signed download URL.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Repository` if the insert fails.
    #[tracing::instrument(skip(self, data), fields(key = %key, bytes = data.len()))]
    pub async fn store(
        &self,
        key: &str,
        owner: UserId,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        ObjectRepository::new(&self.pool)
            .put(key, owner, content_type, data)
            .await?;
        tracing::info!("Object stored");
        self.signed_url(key, Utc::now())
    }

    /// Decode an inline image and store it as a library image.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidImage` if the payload is not valid base64.
    pub async fn store_library_image(
        &self,
        owner: UserId,
        image: &DataUri,
    ) -> Result<String, StorageError> {
        let bytes = image.decode()?;
        let key = library_image_key(owner, image.mime(), Utc::now());
        self.store(&key, owner, image.mime(), &bytes).await
    }

    /// Fetch an object after checking its signature.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidSignature` or `StorageError::Expired`
    /// when the URL does not check out.
    pub async fn fetch(
        &self,
        key: &str,
        expires: i64,
        signature: &str,
    ) -> Result<Option<StoredObject>, StorageError> {
        self.verify(key, expires, signature, Utc::now())?;
        Ok(ObjectRepository::new(&self.pool).get(key).await?)
    }

    /// Download URL for `key`, valid from `now` for the signed-URL lifetime.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidSignature` if the signing key is rejected.
    pub fn signed_url(&self, key: &str, now: DateTime<Utc>) -> Result<String, StorageError> {
        let expires = now.timestamp() + SIGNED_URL_LIFETIME_SECS;
        Ok(format!(
            "{}/media/{key}?expires={expires}&sig={}",
            self.base_url,
            self.sign(key, expires)?
        ))
    }

    fn sign(&self, key: &str, expires: i64) -> Result<String, StorageError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| StorageError::InvalidSignature)?;
        mac.update(format!("{key}:{expires}").as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check a signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Expired` if `expires` is in the past and
    /// `StorageError::InvalidSignature` if the signature does not match.
    pub fn verify(
        &self,
        key: &str,
        expires: i64,
        signature: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        if !constant_time_compare(&self.sign(key, expires)?, signature) {
            return Err(StorageError::InvalidSignature);
        }
        if expires < now.timestamp() {
            return Err(StorageError::Expired);
        }
        Ok(())
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    fn storage() -> MediaStorage {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/artify_test")
            .unwrap();
        MediaStorage::new(
            pool,
            SecretString::from("k7#Qp2!vL9@wZ4$mN8&rT1^yB6*cF3".to_string()),
            "https://artify.example.com/",
        )
    }

    fn parse_query(url: &str) -> (String, i64, String) {
        let parsed = url::Url::parse(url).unwrap();
        let key = parsed.path().trim_start_matches("/media/").to_string();
        let mut expires = 0;
        let mut sig = String::new();
        for (name, value) in parsed.query_pairs() {
            match name.as_ref() {
                "expires" => expires = value.parse().unwrap(),
                "sig" => sig = value.into_owned(),
                _ => {}
            }
        }
        (key, expires, sig)
    }

    #[test]
    fn test_keys() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let owner = UserId::new(42);
        assert_eq!(
            library_image_key(owner, "image/png", now),
            format!("users/42/images/{}.png", now.timestamp_millis())
        );
        assert_eq!(
            profile_pic_key(owner, "image/jpeg", now),
            format!("profile_pics/42_{}.jpg", now.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_signed_url_verifies() {
        let storage = storage();
        let now = Utc::now();
        let url = storage.signed_url("users/1/images/5.png", now).unwrap();
        assert!(url.starts_with("https://artify.example.com/media/users/1/images/5.png?expires="));

        let (key, expires, sig) = parse_query(&url);
        assert_eq!(key, "users/1/images/5.png");
        assert!(storage.verify(&key, expires, &sig, now).is_ok());
    }

    #[tokio::test]
    async fn test_tampered_or_expired_url_rejected() {
        let storage = storage();
        let now = Utc::now();
        let (key, expires, sig) = parse_query(&storage.signed_url("profile_pics/1_9.png", now).unwrap());

        assert!(matches!(
            storage.verify("profile_pics/2_9.png", expires, &sig, now),
            Err(StorageError::InvalidSignature)
        ));
        assert!(matches!(
            storage.verify(&key, expires + 1, &sig, now),
            Err(StorageError::InvalidSignature)
        ));

        let later = now + Duration::seconds(SIGNED_URL_LIFETIME_SECS + 1);
        assert!(matches!(
            storage.verify(&key, expires, &sig, later),
            Err(StorageError::Expired)
        ));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hello!"));
    }
}
