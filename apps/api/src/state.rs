use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::extraction::vocabulary::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Injectable skill vocabulary used by resume feature extraction.
    /// Built once at startup; the extractor itself is a pure function of
    /// (text, vocabulary).
    pub skill_vocab: Arc<SkillVocabulary>,
}
