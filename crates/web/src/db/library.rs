//! Saved-item repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use artify_core::library::{SavedContent, SavedItem, SavedItemKind};
use artify_core::{SavedItemId, UserId};

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct SavedItemRow {
    id: i32,
    kind: String,
    content: Json<SavedContent>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SavedItemRow> for SavedItem {
    type Error = RepositoryError;

    fn try_from(row: SavedItemRow) -> Result<Self, Self::Error> {
        let kind = SavedItemKind::from_db(&row.kind).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("unknown saved item kind: {}", row.kind))
        })?;
        Ok(Self {
            id: SavedItemId::new(row.id),
            kind,
            content: row.content.0,
            created_at: row.created_at,
        })
    }
}

/// Repository for a user's saved generations.
pub struct LibraryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LibraryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a new item for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        kind: SavedItemKind,
        content: &SavedContent,
    ) -> Result<SavedItem, RepositoryError> {
        let row = sqlx::query_as::<_, SavedItemRow>(
            "INSERT INTO artify.saved_items (user_id, kind, content) \
             VALUES ($1, $2, $3) \
             RETURNING id, kind, content, created_at",
        )
        .bind(owner.as_i32())
        .bind(kind.as_str())
        .bind(Json(content))
        .fetch_one(self.pool)
        .await?;

        SavedItem::try_from(row)
    }

    /// Items owned by `owner`, newest first, optionally of one kind.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        owner: UserId,
        kind: Option<SavedItemKind>,
    ) -> Result<Vec<SavedItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, SavedItemRow>(
            "SELECT id, kind, content, created_at \
             FROM artify.saved_items \
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR kind = $2) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(owner.as_i32())
        .bind(kind.map(SavedItemKind::as_str))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(SavedItem::try_from).collect()
    }
}
