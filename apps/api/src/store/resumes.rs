use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::features::ResumeFeatures;
use crate::models::resume::ResumeRow;

pub struct NewResume<'a> {
    pub candidate_name: &'a str,
    pub filename: &'a str,
    pub raw_text: &'a str,
    pub features: &'a ResumeFeatures,
}

/// Persists a freshly uploaded resume together with its computed features.
pub async fn insert_resume(pool: &PgPool, new: NewResume<'_>) -> Result<ResumeRow, AppError> {
    let features = serde_json::to_value(new.features)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize features: {e}")))?;
    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, candidate_name, filename, raw_text, features)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.candidate_name)
    .bind(new.filename)
    .bind(new.raw_text)
    .bind(features)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Returns all resumes, oldest first (stable tie-break order for ranking).
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeRow>, AppError> {
    let rows: Vec<ResumeRow> = sqlx::query_as("SELECT * FROM resumes ORDER BY uploaded_at, id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
