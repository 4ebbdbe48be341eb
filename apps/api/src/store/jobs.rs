use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPayload, JobRow};

/// Returns the full job corpus, oldest first. Insertion order is the stable
/// tie-break key for match ranking, so the ordering here matters.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, AppError> {
    let rows: Vec<JobRow> = sqlx::query_as("SELECT * FROM jobs ORDER BY created_at, id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, AppError> {
    let row: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_job(pool: &PgPool, payload: &JobPayload) -> Result<JobRow, AppError> {
    let payload = sanitize(payload);
    let row: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (id, title, company, description, required_skills,
             min_experience_years, location, salary_range)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&payload.title)
    .bind(&payload.company)
    .bind(&payload.description)
    .bind(&payload.required_skills)
    .bind(payload.min_experience_years)
    .bind(&payload.location)
    .bind(&payload.salary_range)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update_job(
    pool: &PgPool,
    id: Uuid,
    payload: &JobPayload,
) -> Result<JobRow, AppError> {
    let payload = sanitize(payload);
    let row: Option<JobRow> = sqlx::query_as(
        r#"
        UPDATE jobs
        SET title = $2, company = $3, description = $4, required_skills = $5,
            min_experience_years = $6, location = $7, salary_range = $8
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.title)
    .bind(&payload.company)
    .bind(&payload.description)
    .bind(&payload.required_skills)
    .bind(payload.min_experience_years)
    .bind(&payload.location)
    .bind(&payload.salary_range)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    Ok(())
}

/// Sanitizes authored job data instead of rejecting it: negative experience
/// figures clamp to 0, blank skill entries are dropped.
fn sanitize(payload: &JobPayload) -> JobPayload {
    let mut out = payload.clone();
    out.min_experience_years = out.min_experience_years.max(0);
    out.required_skills = out
        .required_skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(skills: Vec<&str>, min_years: i32) -> JobPayload {
        JobPayload {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Build services".to_string(),
            required_skills: skills.into_iter().map(String::from).collect(),
            min_experience_years: min_years,
            location: None,
            salary_range: None,
        }
    }

    #[test]
    fn test_sanitize_clamps_negative_experience() {
        let clean = sanitize(&payload(vec!["rust"], -3));
        assert_eq!(clean.min_experience_years, 0);
    }

    #[test]
    fn test_sanitize_drops_blank_skills() {
        let clean = sanitize(&payload(vec!["rust", "  ", "", " sql "], 2));
        assert_eq!(clean.required_skills, vec!["rust", "sql"]);
    }

    #[test]
    fn test_sanitize_keeps_valid_payload_unchanged() {
        let clean = sanitize(&payload(vec!["python"], 5));
        assert_eq!(clean.required_skills, vec!["python"]);
        assert_eq!(clean.min_experience_years, 5);
    }
}
