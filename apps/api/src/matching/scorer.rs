//! Match scoring: fuses text similarity, skill overlap, and experience fit
//! into one weighted score per (resume, job) pair, and ranks results.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::features::ResumeFeatures;
use crate::extraction::vocabulary::normalize;
use crate::matching::similarity::similarity;
use crate::matching::vectorizer::{DocumentVector, VectorSpace};
use crate::models::job::JobRow;

/// Ratio used when a job requires experience but the resume carried no
/// experience signal at all: genuine uncertainty, neither penalized nor
/// rewarded.
pub const NEUTRAL_EXPERIENCE_RATIO: f64 = 0.5;

/// Fixed scoring policy. The three weights sum to 1.0; they are a named
/// constant of the engine, not user-tunable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub text: f64,
    pub skills: f64,
    pub experience: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            text: 0.6,
            skills: 0.3,
            experience: 0.1,
        }
    }
}

/// A job's matching-relevant requirements, normalized the same way resume
/// skills are so the overlap ratio stays internally consistent.
#[derive(Debug, Clone)]
pub struct JobRequirement {
    pub required_skills: BTreeSet<String>,
    pub min_experience_years: u32,
    /// Combined title + description + declared skills; the text the
    /// vectorizer sees for this job.
    pub description_text: String,
}

impl JobRequirement {
    pub fn from_row(row: &JobRow) -> Self {
        let required_skills = row
            .required_skills
            .iter()
            .map(|s| normalize(s))
            .filter(|s| !s.is_empty())
            .collect();
        JobRequirement {
            required_skills,
            min_experience_years: row.min_experience_years.max(0) as u32,
            description_text: format!(
                "{} {} {}",
                row.title,
                row.description,
                row.required_skills.join(" ")
            ),
        }
    }
}

/// Scores for one (resume, job) pair. Immutable once produced; `subject_id`
/// is the job id when ranking jobs for a resume, the resume id in the
/// symmetric case.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub subject_id: Uuid,
    pub text_similarity: f64,
    pub skill_ratio: f64,
    pub experience_ratio: f64,
    pub final_score: f64,
}

/// Fraction of the job's required skills found in the resume's skill set.
/// A job that declares no skills is vacuously satisfied: ratio 1.0, not a
/// division by zero.
pub fn skill_ratio(resume_skills: &BTreeSet<String>, required: &BTreeSet<String>) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    let matched = required.intersection(resume_skills).count();
    matched as f64 / required.len() as f64
}

/// Experience fit. A job with no minimum always passes; a resume with no
/// experience signal (0 = unknown) gets the neutral ratio; otherwise the
/// fraction of the requirement met, capped at 1.0.
pub fn experience_ratio(resume_years: u32, min_years: u32) -> f64 {
    if min_years == 0 {
        return 1.0;
    }
    if resume_years == 0 {
        return NEUTRAL_EXPERIENCE_RATIO;
    }
    (resume_years as f64 / min_years as f64).min(1.0)
}

/// Computes the full MatchResult for one pair. Both vectors must come from
/// `space`; a mismatch is fatal to the call.
pub fn score(
    subject_id: Uuid,
    features: &ResumeFeatures,
    resume_vec: &DocumentVector,
    job: &JobRequirement,
    job_vec: &DocumentVector,
    space: &VectorSpace,
    weights: &ScoreWeights,
) -> Result<MatchResult, AppError> {
    let text_similarity = similarity(resume_vec, job_vec, space)?.clamp(0.0, 1.0);
    let skill_ratio = skill_ratio(&features.skills, &job.required_skills);
    let experience_ratio = experience_ratio(features.experience_years, job.min_experience_years);

    let final_score = (weights.text * text_similarity
        + weights.skills * skill_ratio
        + weights.experience * experience_ratio)
        .clamp(0.0, 1.0);

    Ok(MatchResult {
        subject_id,
        text_similarity,
        skill_ratio,
        experience_ratio,
        final_score,
    })
}

/// Sorts by final score descending. The sort is stable, so equal scores keep
/// their input order and repeated runs over identical input rank
/// identically.
pub fn rank(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vectorizer::build;

    fn skills(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn requirement(required: &[&str], min_years: u32) -> JobRequirement {
        JobRequirement {
            required_skills: skills(required),
            min_experience_years: min_years,
            description_text: String::new(),
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = ScoreWeights::default();
        assert!((w.text + w.skills + w.experience - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_required_skills_is_vacuously_satisfied() {
        assert_eq!(skill_ratio(&skills(&["python"]), &skills(&[])), 1.0);
        assert_eq!(skill_ratio(&skills(&[]), &skills(&[])), 1.0);
    }

    #[test]
    fn test_skill_ratio_partial() {
        let ratio = skill_ratio(&skills(&["python", "sql"]), &skills(&["python", "sql", "aws", "go"]));
        assert!((ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_skill_ratio_full_overlap() {
        let ratio = skill_ratio(&skills(&["python", "sql", "aws"]), &skills(&["python", "sql", "aws"]));
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_no_experience_requirement_always_passes() {
        assert_eq!(experience_ratio(0, 0), 1.0);
        assert_eq!(experience_ratio(12, 0), 1.0);
    }

    #[test]
    fn test_unknown_experience_is_neutral_not_zero() {
        assert_eq!(experience_ratio(0, 5), NEUTRAL_EXPERIENCE_RATIO);
    }

    #[test]
    fn test_experience_ratio_caps_at_one() {
        assert_eq!(experience_ratio(10, 3), 1.0);
    }

    #[test]
    fn test_experience_ratio_partial() {
        assert!((experience_ratio(2, 4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_job_requirement_normalizes_declared_skills() {
        let row = JobRow {
            id: Uuid::new_v4(),
            title: "Dev".to_string(),
            company: "Acme".to_string(),
            description: "desc".to_string(),
            required_skills: vec!["Python".to_string(), "  SQL  ".to_string(), "".to_string()],
            min_experience_years: -2,
            location: None,
            salary_range: None,
            created_at: chrono::Utc::now(),
        };
        let req = JobRequirement::from_row(&row);
        assert_eq!(req.required_skills, skills(&["python", "sql"]));
        // negative figures are malformed input, clamped rather than rejected
        assert_eq!(req.min_experience_years, 0);
    }

    #[test]
    fn test_final_score_within_bounds() {
        let (space, v) = build(&["rust developer", "rust developer wanted"]);
        let features = ResumeFeatures {
            skills: skills(&["rust"]),
            experience_years: 3,
            ..Default::default()
        };
        let result = score(
            Uuid::new_v4(),
            &features,
            &v[0],
            &requirement(&["rust"], 2),
            &v[1],
            &space,
            &ScoreWeights::default(),
        )
        .unwrap();
        assert!((0.0..=1.0).contains(&result.final_score));
        assert!((0.0..=1.0).contains(&result.text_similarity));
    }

    #[test]
    fn test_scenario_strong_candidate() {
        // Resume and job with heavy text overlap, full skill coverage, and
        // experience above the minimum.
        let resume_text = "5 years of experience in Python and SQL, AWS certified";
        let job_text = "5 years of experience in Python and SQL, AWS certified engineers wanted";
        let (space, v) = build(&[resume_text, job_text]);

        let features = ResumeFeatures {
            skills: skills(&["python", "sql", "aws"]),
            experience_years: 5,
            ..Default::default()
        };
        let result = score(
            Uuid::new_v4(),
            &features,
            &v[0],
            &requirement(&["python", "sql", "aws"], 3),
            &v[1],
            &space,
            &ScoreWeights::default(),
        )
        .unwrap();

        assert_eq!(result.skill_ratio, 1.0);
        assert_eq!(result.experience_ratio, 1.0);
        assert!(
            result.final_score >= 0.7,
            "final_score was {}",
            result.final_score
        );
    }

    #[test]
    fn test_scenario_unknown_experience_neutral() {
        let (space, v) = build(&["python developer", "python developer needed"]);
        let features = ResumeFeatures {
            skills: skills(&["python"]),
            experience_years: 0, // no phrase extracted
            ..Default::default()
        };
        let result = score(
            Uuid::new_v4(),
            &features,
            &v[0],
            &requirement(&["python"], 5),
            &v[1],
            &space,
            &ScoreWeights::default(),
        )
        .unwrap();
        assert_eq!(result.experience_ratio, NEUTRAL_EXPERIENCE_RATIO);
    }

    #[test]
    fn test_rank_descending() {
        let mk = |id: u128, s: f64| MatchResult {
            subject_id: Uuid::from_u128(id),
            text_similarity: s,
            skill_ratio: 0.0,
            experience_ratio: 0.0,
            final_score: s,
        };
        let mut results = vec![mk(1, 0.2), mk(2, 0.9), mk(3, 0.5)];
        rank(&mut results);
        assert_eq!(results[0].subject_id, Uuid::from_u128(2));
        assert_eq!(results[1].subject_id, Uuid::from_u128(3));
        assert_eq!(results[2].subject_id, Uuid::from_u128(1));
    }

    #[test]
    fn test_rank_stable_on_ties() {
        let mk = |id: u128, s: f64| MatchResult {
            subject_id: Uuid::from_u128(id),
            text_similarity: s,
            skill_ratio: 0.0,
            experience_ratio: 0.0,
            final_score: s,
        };
        let mut results = vec![mk(1, 0.5), mk(2, 0.5), mk(3, 0.5)];
        rank(&mut results);
        let order: Vec<Uuid> = results.iter().map(|r| r.subject_id).collect();
        assert_eq!(
            order,
            vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );
    }
}
