use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{CreateExperienceInput, Experience, Localized};
use crate::error::ApiError;

const SELECT_COLUMNS: &str = "id, logo, company_en, company_pt, role_en, role_pt, \
     period_en, period_pt, description_en, description_pt, \
     tech, achievements_en, achievements_pt, created_at, updated_at";

/// Persistence for work experience. Achievements are stored as two
/// parallel per-language arrays and re-paired on read.
#[derive(Debug, Clone)]
pub struct ExperienceStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ExperienceRow {
    id: i64,
    logo: Option<String>,
    company_en: String,
    company_pt: String,
    role_en: String,
    role_pt: String,
    period_en: String,
    period_pt: String,
    description_en: String,
    description_pt: String,
    tech: String,
    achievements_en: String,
    achievements_pt: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExperienceRow {
    fn into_experience(self) -> Result<Experience, serde_json::Error> {
        let achievements_en: Vec<String> = serde_json::from_str(&self.achievements_en)?;
        let achievements_pt: Vec<String> = serde_json::from_str(&self.achievements_pt)?;

        // Pairs are rebuilt up to the shorter side; the excess entries of
        // the longer array are dropped.
        let achievements = achievements_en
            .into_iter()
            .zip(achievements_pt)
            .map(|(en, pt)| Localized { en, pt })
            .collect();

        Ok(Experience {
            id: self.id,
            logo: self.logo.unwrap_or_default(),
            company: Localized {
                en: self.company_en,
                pt: self.company_pt,
            },
            role: Localized {
                en: self.role_en,
                pt: self.role_pt,
            },
            period: Localized {
                en: self.period_en,
                pt: self.period_pt,
            },
            description: Localized {
                en: self.description_en,
                pt: self.description_pt,
            },
            tech: serde_json::from_str(&self.tech)?,
            achievements,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn split_achievements(achievements: &[Localized]) -> (Vec<&str>, Vec<&str>) {
    achievements
        .iter()
        .map(|a| (a.en.as_str(), a.pt.as_str()))
        .unzip()
}

impl ExperienceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Experience>, ApiError> {
        let rows: Vec<ExperienceRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM experiences ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_experience().map_err(ApiError::from))
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<Experience>, ApiError> {
        let row: Option<ExperienceRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM experiences WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_experience().map_err(ApiError::from))
            .transpose()
    }

    pub async fn create(&self, input: CreateExperienceInput) -> Result<Experience, ApiError> {
        let (achievements_en, achievements_pt) = split_achievements(&input.achievements);
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO experiences (logo, company_en, company_pt, role_en, role_pt,
                period_en, period_pt, description_en, description_pt,
                tech, achievements_en, achievements_pt, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.logo)
        .bind(&input.company_en)
        .bind(&input.company_pt)
        .bind(&input.role_en)
        .bind(&input.role_pt)
        .bind(&input.period_en)
        .bind(&input.period_pt)
        .bind(&input.description_en)
        .bind(&input.description_pt)
        .bind(serde_json::to_string(&input.tech)?)
        .bind(serde_json::to_string(&achievements_en)?)
        .bind(serde_json::to_string(&achievements_pt)?)
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
        input: CreateExperienceInput,
    ) -> Result<Option<Experience>, ApiError> {
        let (achievements_en, achievements_pt) = split_achievements(&input.achievements);

        let result = sqlx::query(
            r#"
            UPDATE experiences SET
                logo = ?, company_en = ?, company_pt = ?, role_en = ?, role_pt = ?,
                period_en = ?, period_pt = ?, description_en = ?, description_pt = ?,
                tech = ?, achievements_en = ?, achievements_pt = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.logo)
        .bind(&input.company_en)
        .bind(&input.company_pt)
        .bind(&input.role_en)
        .bind(&input.role_pt)
        .bind(&input.period_en)
        .bind(&input.period_pt)
        .bind(&input.description_en)
        .bind(&input.description_pt)
        .bind(serde_json::to_string(&input.tech)?)
        .bind(serde_json::to_string(&achievements_en)?)
        .bind(serde_json::to_string(&achievements_pt)?)
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
        let result = sqlx::query("DELETE FROM experiences WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
