use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{CreateProjectInput, Localized, LocalizedList, Project, StatusLabel};
use crate::error::ApiError;

const SELECT_COLUMNS: &str = "id, status_text, status_color, image, title_en, title_pt, \
     short_desc_en, short_desc_pt, full_desc_en, full_desc_pt, \
     features_en, features_pt, tech, link, created_at, updated_at";

/// Persistence for portfolio projects. Updates are full-replace: every
/// column is rewritten from the create-shaped input.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    status_text: String,
    status_color: String,
    image: String,
    title_en: String,
    title_pt: String,
    short_desc_en: String,
    short_desc_pt: String,
    full_desc_en: String,
    full_desc_pt: String,
    features_en: String,
    features_pt: String,
    tech: String,
    link: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self) -> Result<Project, serde_json::Error> {
        Ok(Project {
            id: self.id,
            status: StatusLabel {
                text: self.status_text,
                color: self.status_color,
            },
            image: self.image,
            title: Localized {
                en: self.title_en,
                pt: self.title_pt,
            },
            short_description: Localized {
                en: self.short_desc_en,
                pt: self.short_desc_pt,
            },
            full_description: Localized {
                en: self.full_desc_en,
                pt: self.full_desc_pt,
            },
            features: LocalizedList {
                en: serde_json::from_str(&self.features_en)?,
                pt: serde_json::from_str(&self.features_pt)?,
            },
            tech: serde_json::from_str(&self.tech)?,
            link: self.link,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProjectStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_project().map_err(ApiError::from))
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<Project>, ApiError> {
        let row: Option<ProjectRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM projects WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| r.into_project().map_err(ApiError::from))
            .transpose()
    }

    pub async fn create(&self, input: CreateProjectInput) -> Result<Project, ApiError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO projects (status_text, status_color, image, title_en, title_pt,
                short_desc_en, short_desc_pt, full_desc_en, full_desc_pt,
                features_en, features_pt, tech, link, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.status_text)
        .bind(&input.status_color)
        .bind(&input.image)
        .bind(&input.title_en)
        .bind(&input.title_pt)
        .bind(&input.short_desc_en)
        .bind(&input.short_desc_pt)
        .bind(&input.full_desc_en)
        .bind(&input.full_desc_pt)
        .bind(serde_json::to_string(&input.features_en)?)
        .bind(serde_json::to_string(&input.features_pt)?)
        .bind(serde_json::to_string(&input.tech)?)
        .bind(&input.link)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(id).await?.ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    /// Full-replace update. Returns `None` when no row has this id.
    pub async fn update(
        &self,
        id: i64,
        input: CreateProjectInput,
    ) -> Result<Option<Project>, ApiError> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                status_text = ?, status_color = ?, image = ?, title_en = ?, title_pt = ?,
                short_desc_en = ?, short_desc_pt = ?, full_desc_en = ?, full_desc_pt = ?,
                features_en = ?, features_pt = ?, tech = ?, link = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.status_text)
        .bind(&input.status_color)
        .bind(&input.image)
        .bind(&input.title_en)
        .bind(&input.title_pt)
        .bind(&input.short_desc_en)
        .bind(&input.short_desc_pt)
        .bind(&input.full_desc_en)
        .bind(&input.full_desc_pt)
        .bind(serde_json::to_string(&input.features_en)?)
        .bind(serde_json::to_string(&input.features_pt)?)
        .bind(serde_json::to_string(&input.tech)?)
        .bind(&input.link)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Returns `true` when a row was actually deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
