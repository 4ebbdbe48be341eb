use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::features::{self, ResumeFeatures};
use crate::extraction::text::{extract_text, ResumeFormat};
use crate::matching::engine::{self, JobMatch};
use crate::models::resume::ResumeRow;
use crate::state::AppState;
use crate::store;

/// Matches returned inline with an upload; the dedicated matches endpoint
/// serves larger pages.
const UPLOAD_MATCH_LIMIT: usize = 5;

#[derive(Serialize)]
pub struct UploadResponse {
    pub resume: ResumeRow,
    pub features: ResumeFeatures,
    /// True when extraction produced an empty feature set; the resume is
    /// stored regardless and scoring treats missing attributes as neutral.
    pub extraction_degraded: bool,
    pub matches: Vec<JobMatch>,
}

/// POST /api/v1/resumes (multipart: `resume` file + optional `candidate_name`)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename = String::new();
    let mut candidate_name = "Unknown".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("resume") => {
                filename = field.file_name().unwrap_or("resume").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("candidate_name") => {
                candidate_name = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid candidate_name: {e}")))?;
            }
            _ => {}
        }
    }

    let file_bytes =
        file_bytes.ok_or_else(|| AppError::Validation("no resume file provided".to_string()))?;
    let format = ResumeFormat::from_filename(&filename).ok_or_else(|| {
        AppError::UnsupportedFormat(format!("unrecognized file type: {filename}"))
    })?;

    let raw_text = extract_text(&file_bytes, format)?;
    let features = features::extract(&raw_text, &state.skill_vocab);

    let extraction_degraded = raw_text.trim().is_empty() || features.is_empty();
    if extraction_degraded {
        warn!(%filename, "extraction degraded: no features found, storing empty feature set");
    }

    let resume = store::resumes::insert_resume(
        &state.db,
        store::resumes::NewResume {
            candidate_name: &candidate_name,
            filename: &filename,
            raw_text: &raw_text,
            features: &features,
        },
    )
    .await?;

    info!(resume_id = %resume.id, skills = features.skills.len(), "resume ingested");

    // Score against the current job corpus so the caller sees matches
    // immediately. An empty corpus yields an empty list, not an error.
    let jobs = store::jobs::list_jobs(&state.db).await?;
    let matches = engine::rank_jobs(&raw_text, &features, &jobs, UPLOAD_MATCH_LIMIT)?;

    Ok(Json(UploadResponse {
        resume,
        features,
        extraction_degraded,
        matches,
    }))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = store::resumes::list_resumes(&state.db).await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = store::resumes::get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}
