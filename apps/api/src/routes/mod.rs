pub mod health;

use axum::{routing::get, Router};

use crate::extraction::handlers as resume_handlers;
use crate::jobs::handlers as job_handlers;
use crate::matching::handlers as match_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resume_handlers::handle_list_resumes)
                .post(resume_handlers::handle_upload_resume),
        )
        .route("/api/v1/resumes/:id", get(resume_handlers::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/matches",
            get(match_handlers::handle_resume_matches),
        )
        // Job API
        .route(
            "/api/v1/jobs",
            get(job_handlers::handle_list_jobs).post(job_handlers::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(job_handlers::handle_get_job)
                .put(job_handlers::handle_update_job)
                .delete(job_handlers::handle_delete_job),
        )
        .route(
            "/api/v1/jobs/:id/matches",
            get(match_handlers::handle_job_matches),
        )
        .with_state(state)
}
