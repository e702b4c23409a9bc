//! API-facing records and request inputs for the four entities.
//!
//! Wire shape matches the site frontend: camelCase keys, bilingual values
//! as `{en, pt}` objects. Rows are flat in SQLite; each store reassembles
//! the nested shape on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A text value in both supported languages. No equivalence between the
/// two sides is enforced anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub pt: String,
}

/// Parallel per-language string lists (not required to be equal length).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedList {
    #[serde(default)]
    pub en: Vec<String>,
    #[serde(default)]
    pub pt: Vec<String>,
}

/// Project status badge: a label plus its display color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabel {
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub status: StatusLabel,
    pub image: String,
    pub title: Localized,
    pub short_description: Localized,
    pub full_description: Localized,
    pub features: LocalizedList,
    pub tech: Vec<String>,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i64,
    pub logo: String,
    pub company: Localized,
    pub role: Localized,
    pub period: Localized,
    pub description: Localized,
    pub tech: Vec<String>,
    pub achievements: Vec<Localized>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    pub id: i64,
    pub slug: String,
    pub title: Localized,
    pub content: Localized,
    pub category: String,
    pub published: bool,
    #[serde(rename = "order")]
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub status_color: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub title_pt: String,
    #[serde(default)]
    pub short_desc_en: String,
    #[serde(default)]
    pub short_desc_pt: String,
    #[serde(default)]
    pub full_desc_en: String,
    #[serde(default)]
    pub full_desc_pt: String,
    #[serde(default)]
    pub features_en: Vec<String>,
    #[serde(default)]
    pub features_pt: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub link: String,
}

impl CreateProjectInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("statusText", &self.status_text)?;
        require("statusColor", &self.status_color)?;
        require("image", &self.image)?;
        require("titleEn", &self.title_en)?;
        require("titlePt", &self.title_pt)?;
        require("shortDescEn", &self.short_desc_en)?;
        require("shortDescPt", &self.short_desc_pt)?;
        if self.tech.is_empty() {
            return Err(ApiError::InvalidInput("tech is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExperienceInput {
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub company_en: String,
    #[serde(default)]
    pub company_pt: String,
    #[serde(default)]
    pub role_en: String,
    #[serde(default)]
    pub role_pt: String,
    #[serde(default)]
    pub period_en: String,
    #[serde(default)]
    pub period_pt: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_pt: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<Localized>,
}

impl CreateExperienceInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("companyEn", &self.company_en)?;
        require("companyPt", &self.company_pt)?;
        require("roleEn", &self.role_en)?;
        require("rolePt", &self.role_pt)?;
        require("periodEn", &self.period_en)?;
        require("periodPt", &self.period_pt)?;
        require("descriptionEn", &self.description_en)?;
        require("descriptionPt", &self.description_pt)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("message", &self.message)?;
        if !looks_like_email(&self.email) {
            return Err(ApiError::InvalidInput(
                "email is not a valid address".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocInput {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub title_pt: String,
    #[serde(default)]
    pub content_en: String,
    #[serde(default)]
    pub content_pt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default, rename = "order")]
    pub display_order: i64,
}

impl CreateDocInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("slug", &self.slug)?;
        require("titleEn", &self.title_en)?;
        require("titlePt", &self.title_pt)?;
        require("contentEn", &self.content_en)?;
        require("contentPt", &self.content_pt)?;
        require("category", &self.category)?;
        Ok(())
    }
}

/// Sparse documentation update: only supplied fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocInput {
    pub slug: Option<String>,
    pub title_en: Option<String>,
    pub title_pt: Option<String>,
    pub content_en: Option<String>,
    pub content_pt: Option<String>,
    pub category: Option<String>,
    pub published: Option<bool>,
    #[serde(rename = "order")]
    pub display_order: Option<i64>,
}

fn require(name: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{name} is required")));
    }
    Ok(())
}

fn looks_like_email(address: &str) -> bool {
    address
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::{ContactInput, Localized};

    #[test]
    fn contact_input_rejects_blank_and_malformed_email() {
        let base = ContactInput {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "hello".to_string(),
        };
        assert!(base.validate().is_ok());

        let blank = ContactInput {
            name: "  ".to_string(),
            ..base.clone()
        };
        assert!(blank.validate().is_err());

        let bad_email = ContactInput {
            email: "not-an-address".to_string(),
            ..base
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn localized_serializes_as_en_pt_object() {
        let value = Localized {
            en: "Hello".to_string(),
            pt: "Olá".to_string(),
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({"en": "Hello", "pt": "Olá"}));
    }
}
