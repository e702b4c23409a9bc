use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{CreateDocInput, DocEntry, Localized, UpdateDocInput};
use crate::error::ApiError;
use crate::slug;

const SELECT_COLUMNS: &str = "id, slug, title_en, title_pt, content_en, content_pt, \
     category, published, display_order, created_at, updated_at";

const INVALID_SLUG: &str =
    "invalid slug format: must contain only lowercase letters, numbers, and hyphens";

/// Persistence for documentation articles.
///
/// Slug policy lives here: every candidate slug is normalized before it
/// touches the table, and a conflict is only a conflict when the slug
/// belongs to a *different* record.
#[derive(Debug, Clone)]
pub struct DocStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct DocRow {
    id: i64,
    slug: String,
    title_en: String,
    title_pt: String,
    content_en: String,
    content_pt: String,
    category: String,
    published: bool,
    display_order: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocRow {
    fn into_entry(self) -> DocEntry {
        DocEntry {
            id: self.id,
            slug: self.slug,
            title: Localized {
                en: self.title_en,
                pt: self.title_pt,
            },
            content: Localized {
                en: self.content_en,
                pt: self.content_pt,
            },
            category: self.category,
            published: self.published,
            display_order: self.display_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl DocStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, published_only: bool) -> Result<Vec<DocEntry>, ApiError> {
        let sql = if published_only {
            format!(
                "SELECT {SELECT_COLUMNS} FROM documentation WHERE published = 1 \
                 ORDER BY display_order ASC, created_at DESC"
            )
        } else {
            format!(
                "SELECT {SELECT_COLUMNS} FROM documentation \
                 ORDER BY display_order ASC, created_at DESC"
            )
        };
        let rows: Vec<DocRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(DocRow::into_entry).collect())
    }

    pub async fn list_by_category(
        &self,
        category: &str,
        published_only: bool,
    ) -> Result<Vec<DocEntry>, ApiError> {
        let sql = if published_only {
            format!(
                "SELECT {SELECT_COLUMNS} FROM documentation WHERE category = ? AND published = 1 \
                 ORDER BY display_order ASC, created_at DESC"
            )
        } else {
            format!(
                "SELECT {SELECT_COLUMNS} FROM documentation WHERE category = ? \
                 ORDER BY display_order ASC, created_at DESC"
            )
        };
        let rows: Vec<DocRow> = sqlx::query_as(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(DocRow::into_entry).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<DocEntry>, ApiError> {
        let row: Option<DocRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM documentation WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(DocRow::into_entry))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<DocEntry>, ApiError> {
        let row: Option<DocRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM documentation WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(DocRow::into_entry))
    }

    pub async fn create(&self, input: CreateDocInput) -> Result<DocEntry, ApiError> {
        let slug = slug::normalize(&input.slug);
        if !slug::is_valid(&slug) {
            return Err(ApiError::InvalidInput(INVALID_SLUG.to_string()));
        }
        if self.slug_owner(&slug).await?.is_some() {
            return Err(ApiError::SlugConflict(slug));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO documentation (slug, title_en, title_pt, content_en, content_pt,
                category, published, display_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&slug)
        .bind(&input.title_en)
        .bind(&input.title_pt)
        .bind(&input.content_en)
        .bind(&input.content_pt)
        .bind(&input.category)
        .bind(input.published)
        .bind(input.display_order)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    /// Sparse update: absent fields keep their stored value via
    /// `COALESCE`, `updated_at` is refreshed unconditionally, and a patch
    /// with no fields set still succeeds and returns the stored record.
    pub async fn update(&self, id: i64, patch: UpdateDocInput) -> Result<DocEntry, ApiError> {
        if self.get_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound("documentation"));
        }

        let slug = match patch.slug.as_deref() {
            Some(raw) => {
                let normalized = slug::normalize(raw);
                if !slug::is_valid(&normalized) {
                    return Err(ApiError::InvalidInput(INVALID_SLUG.to_string()));
                }
                // The record may keep the slug it already has.
                if let Some(owner) = self.slug_owner(&normalized).await?
                    && owner != id
                {
                    return Err(ApiError::SlugConflict(normalized));
                }
                Some(normalized)
            }
            None => None,
        };

        sqlx::query(
            r#"
            UPDATE documentation
            SET
                slug = COALESCE(?, slug),
                title_en = COALESCE(?, title_en),
                title_pt = COALESCE(?, title_pt),
                content_en = COALESCE(?, content_en),
                content_pt = COALESCE(?, content_pt),
                category = COALESCE(?, category),
                published = COALESCE(?, published),
                display_order = COALESCE(?, display_order),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(slug)
        .bind(patch.title_en)
        .bind(patch.title_pt)
        .bind(patch.content_en)
        .bind(patch.content_pt)
        .bind(patch.category)
        .bind(patch.published)
        .bind(patch.display_order)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    /// Returns `true` when a row was actually deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM documentation WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<i64>, ApiError> {
        let owner = sqlx::query_scalar("SELECT id FROM documentation WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }
}
