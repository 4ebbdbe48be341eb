use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::{self, JobMatch, ResumeMatch, DEFAULT_MATCH_LIMIT};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MatchQuery {
    pub limit: Option<usize>,
}

impl MatchQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_MATCH_LIMIT)
    }
}

/// GET /api/v1/resumes/:id/matches?limit=N
pub async fn handle_resume_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    let matches = engine::match_resume_to_jobs(&state.db, id, query.limit()).await?;
    Ok(Json(matches))
}

/// GET /api/v1/jobs/:id/matches?limit=N
pub async fn handle_job_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Vec<ResumeMatch>>, AppError> {
    let matches = engine::match_job_to_resumes(&state.db, id, query.limit()).await?;
    Ok(Json(matches))
}
