use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored job posting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub min_experience_years: i32,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Client payload for creating or replacing a job posting.
/// Sanitized at the store boundary rather than rejected: negative experience
/// clamps to 0 and blank skill entries are dropped, since authored job data
/// is as noisy as resume text.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPayload {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub min_experience_years: i32,
    pub location: Option<String>,
    pub salary_range: Option<String>,
}
