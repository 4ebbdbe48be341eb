use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume: raw extracted text plus the feature set computed at
/// upload time (`features` is a serialized `ResumeFeatures`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub filename: String,
    pub raw_text: String,
    pub features: Value,
    pub uploaded_at: DateTime<Utc>,
}
