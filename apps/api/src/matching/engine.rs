//! The per-request matching pipeline: take a corpus snapshot, build one
//! vector space over it, score every pair, rank, truncate.
//!
//! Each request builds its own `VectorSpace`; nothing is cached across
//! requests, so concurrent requests never observe each other's corpus.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::features::ResumeFeatures;
use crate::matching::scorer::{self, JobRequirement, MatchResult, ScoreWeights};
use crate::matching::vectorizer;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::store;

pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// One ranked job for a resume query.
#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub job_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub text_similarity: f64,
    pub skill_ratio: f64,
    pub experience_ratio: f64,
    pub final_score: f64,
}

/// One ranked resume for a job query.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeMatch {
    pub resume_id: Uuid,
    pub candidate_name: String,
    pub text_similarity: f64,
    pub skill_ratio: f64,
    pub experience_ratio: f64,
    pub final_score: f64,
}

/// Ranks every stored job against one resume. An empty job corpus is an
/// empty result list, not an error.
pub async fn match_resume_to_jobs(
    pool: &PgPool,
    resume_id: Uuid,
    limit: usize,
) -> Result<Vec<JobMatch>, AppError> {
    let resume = store::resumes::get_resume(pool, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    let features = decode_features(&resume);
    let jobs = store::jobs::list_jobs(pool).await?;
    rank_jobs(&resume.raw_text, &features, &jobs, limit)
}

/// Symmetric case: ranks every stored resume against one job.
pub async fn match_job_to_resumes(
    pool: &PgPool,
    job_id: Uuid,
    limit: usize,
) -> Result<Vec<ResumeMatch>, AppError> {
    let job = store::jobs::get_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let resumes = store::resumes::list_resumes(pool).await?;
    rank_resumes(&job, &resumes, limit)
}

/// Pure pipeline for the resume -> jobs direction: one vectorizer build over
/// (the resume text plus all job texts), score every pair, rank with stable
/// ties on job input order, truncate.
pub fn rank_jobs(
    resume_text: &str,
    features: &ResumeFeatures,
    jobs: &[JobRow],
    limit: usize,
) -> Result<Vec<JobMatch>, AppError> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let requirements: Vec<JobRequirement> = jobs.iter().map(JobRequirement::from_row).collect();
    let resume_doc = resume_document_text(resume_text, features);

    let mut corpus: Vec<&str> = Vec::with_capacity(jobs.len() + 1);
    corpus.push(&resume_doc);
    for req in &requirements {
        corpus.push(&req.description_text);
    }

    let (space, vectors) = vectorizer::build(&corpus);
    debug!(
        corpus_size = space.corpus_size(),
        vocabulary = space.vocabulary_len(),
        "vector space built"
    );

    let weights = ScoreWeights::default();
    let resume_vec = &vectors[0];
    let mut results: Vec<MatchResult> = Vec::with_capacity(jobs.len());
    for (i, (job, req)) in jobs.iter().zip(&requirements).enumerate() {
        results.push(scorer::score(
            job.id,
            features,
            resume_vec,
            req,
            &vectors[i + 1],
            &space,
            &weights,
        )?);
    }

    scorer::rank(&mut results);
    results.truncate(limit);

    let by_id: HashMap<Uuid, &JobRow> = jobs.iter().map(|j| (j.id, j)).collect();
    Ok(results
        .into_iter()
        .filter_map(|r| {
            by_id.get(&r.subject_id).map(|job| JobMatch {
                job_id: job.id,
                job_title: job.title.clone(),
                company: job.company.clone(),
                text_similarity: r.text_similarity,
                skill_ratio: r.skill_ratio,
                experience_ratio: r.experience_ratio,
                final_score: r.final_score,
            })
        })
        .collect())
}

/// Pure pipeline for the job -> resumes direction.
pub fn rank_resumes(
    job: &JobRow,
    resumes: &[ResumeRow],
    limit: usize,
) -> Result<Vec<ResumeMatch>, AppError> {
    if resumes.is_empty() {
        return Ok(Vec::new());
    }

    let requirement = JobRequirement::from_row(job);
    let all_features: Vec<ResumeFeatures> = resumes.iter().map(decode_features).collect();
    let resume_docs: Vec<String> = resumes
        .iter()
        .zip(&all_features)
        .map(|(r, f)| resume_document_text(&r.raw_text, f))
        .collect();

    let mut corpus: Vec<&str> = Vec::with_capacity(resumes.len() + 1);
    corpus.push(&requirement.description_text);
    for doc in &resume_docs {
        corpus.push(doc);
    }

    let (space, vectors) = vectorizer::build(&corpus);
    let weights = ScoreWeights::default();
    let job_vec = &vectors[0];

    let mut results: Vec<MatchResult> = Vec::with_capacity(resumes.len());
    for (i, (resume, features)) in resumes.iter().zip(&all_features).enumerate() {
        results.push(scorer::score(
            resume.id,
            features,
            &vectors[i + 1],
            &requirement,
            job_vec,
            &space,
            &weights,
        )?);
    }

    scorer::rank(&mut results);
    results.truncate(limit);

    let by_id: HashMap<Uuid, &ResumeRow> = resumes.iter().map(|r| (r.id, r)).collect();
    Ok(results
        .into_iter()
        .filter_map(|r| {
            by_id.get(&r.subject_id).map(|resume| ResumeMatch {
                resume_id: resume.id,
                candidate_name: resume.candidate_name.clone(),
                text_similarity: r.text_similarity,
                skill_ratio: r.skill_ratio,
                experience_ratio: r.experience_ratio,
                final_score: r.final_score,
            })
        })
        .collect())
}

/// The resume's document text for vectorization: raw text plus extracted
/// skills, mirroring how the job side folds declared skills into its text.
fn resume_document_text(raw_text: &str, features: &ResumeFeatures) -> String {
    let skills: Vec<&str> = features.skills.iter().map(String::as_str).collect();
    format!("{} {}", raw_text, skills.join(" "))
}

/// Stored features are trusted but not assumed: an undecodable blob degrades
/// to the empty feature set instead of failing the request.
fn decode_features(resume: &ResumeRow) -> ResumeFeatures {
    match serde_json::from_value(resume.features.clone()) {
        Ok(features) => features,
        Err(e) => {
            warn!(resume_id = %resume.id, "stored features undecodable ({e}), using empty set");
            ResumeFeatures::default()
        }
    }
}
