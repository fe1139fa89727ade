//! Object storage backed by `artify.objects`.
//!
//! Objects are written once under a caller-chosen key and read back by key.

use sqlx::PgPool;

use artify_core::UserId;

use super::{RepositoryError, conflict_or_database};

/// A stored object's payload.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredObject {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Repository for stored objects.
pub struct ObjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ObjectRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store `data` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the key is already taken.
    pub async fn put(
        &self,
        key: &str,
        owner: UserId,
        content_type: &str,
        data: &[u8],
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO artify.objects (key, owner_id, content_type, data) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(key)
        .bind(owner.as_i32())
        .bind(content_type)
        .bind(data)
        .execute(self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "object key"))?;
        Ok(())
    }

    /// Fetch the object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<StoredObject>, RepositoryError> {
        Ok(sqlx::query_as::<_, StoredObject>(
            "SELECT content_type, data FROM artify.objects WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(self.pool)
        .await?)
    }
}
