//! Resume feature extraction: a pure, deterministic function of
//! (raw text, skill vocabulary). Never fails; malformed or empty text
//! degrades to an all-empty feature set.

use std::collections::BTreeSet;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extraction::vocabulary::{contains_term, normalize, SkillVocabulary, EDUCATION_MARKERS};

/// Spans longer than this are treated as parsing noise, not careers.
const MAX_PLAUSIBLE_YEARS: u32 = 60;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Structured attributes derived from one resume's plain text.
/// `experience_years == 0` means "no signal found", not "zero experience";
/// the scorer maps it to a neutral ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeatures {
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
    pub education_markers: BTreeSet<String>,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl ResumeFeatures {
    /// True when extraction found nothing at all (the degraded case).
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.experience_years == 0
            && self.education_markers.is_empty()
            && self.contact.email.is_none()
            && self.contact.phone.is_none()
    }
}

/// Extracts all features from raw resume text. Deterministic: identical text
/// and vocabulary always yield identical output.
pub fn extract(raw_text: &str, vocab: &SkillVocabulary) -> ResumeFeatures {
    let normalized = normalize(raw_text);

    let skills = vocab
        .terms()
        .iter()
        .filter(|term| contains_term(&normalized, term))
        .cloned()
        .collect();

    let education_markers = EDUCATION_MARKERS
        .iter()
        .filter(|marker| contains_term(&normalized, marker))
        .map(|m| m.to_string())
        .collect();

    ResumeFeatures {
        skills,
        experience_years: estimate_experience_years(raw_text),
        education_markers,
        contact: ContactInfo {
            email: extract_email(raw_text),
            phone: extract_phone(raw_text),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience estimation
// ────────────────────────────────────────────────────────────────────────────

static YEARS_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*years?\s+(?:of\s+)?experience").expect("valid regex")
});

static EXPERIENCE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bexperience\s*[:\-]?\s*(\d{1,2})\s*\+?\s*years?").expect("valid regex")
});

static YEAR_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to|until)\s*((?:19|20)\d{2}|present|current|now)\b")
        .expect("valid regex")
});

/// Scans for explicit "N years of experience" phrases and calendar-year
/// ranges, taking the maximum plausible estimate. Returns 0 when no signal
/// is found.
fn estimate_experience_years(text: &str) -> u32 {
    let mut best: u32 = 0;

    for re in [&*YEARS_PHRASE_RE, &*EXPERIENCE_PREFIX_RE] {
        for caps in re.captures_iter(text) {
            if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                if n <= MAX_PLAUSIBLE_YEARS {
                    best = best.max(n);
                }
            }
        }
    }

    let current_year = chrono::Utc::now().year();
    for caps in YEAR_RANGE_RE.captures_iter(text) {
        let start = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok());
        let end = match caps.get(2).map(|m| m.as_str()) {
            Some(s) if s.chars().all(|c| c.is_ascii_digit()) => s.parse::<i32>().ok(),
            Some(_) => Some(current_year), // "present" / "current" / "now"
            None => None,
        };
        if let (Some(start), Some(end)) = (start, end) {
            if end >= start {
                let span = (end - start) as u32;
                if (1..=MAX_PLAUSIBLE_YEARS).contains(&span) {
                    best = best.max(span);
                }
            }
        }
    }

    best
}

// ────────────────────────────────────────────────────────────────────────────
// Contact extraction
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().\-]{5,18}\d").expect("valid regex"));

/// First well-formed email-shaped token, if any.
fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped token: a digit run of plausible length (7 to 15
/// digits) with separators tolerated. Calendar-year ranges like "2018-2023"
/// are digit runs of valid length, so candidates that parse as year ranges
/// are skipped.
fn extract_phone(text: &str) -> Option<String> {
    for m in PHONE_RE.find_iter(text) {
        let candidate = m.as_str();
        if YEAR_RANGE_RE.is_match(candidate) {
            continue;
        }
        let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
        if (7..=15).contains(&digits) {
            return Some(candidate.trim().to_string());
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> SkillVocabulary {
        SkillVocabulary::new(["python", "sql", "aws", "java", "javascript", "machine learning"])
    }

    const SAMPLE: &str = "5 years of experience in Python and SQL, AWS certified";

    #[test]
    fn test_extraction_is_deterministic() {
        let v = vocab();
        assert_eq!(extract(SAMPLE, &v), extract(SAMPLE, &v));
    }

    #[test]
    fn test_empty_text_degrades_to_empty_features() {
        let features = extract("", &vocab());
        assert!(features.is_empty());
        assert_eq!(features.experience_years, 0);
    }

    #[test]
    fn test_sample_resume_skills_and_experience() {
        let features = extract(SAMPLE, &vocab());
        assert!(features.skills.contains("python"));
        assert!(features.skills.contains("sql"));
        assert!(features.skills.contains("aws"));
        assert_eq!(features.experience_years, 5);
    }

    #[test]
    fn test_word_boundary_java_not_in_javascript() {
        let features = extract("Senior JavaScript developer", &vocab());
        assert!(features.skills.contains("javascript"));
        assert!(!features.skills.contains("java"));
    }

    #[test]
    fn test_multi_word_skill() {
        let features = extract("Built machine learning pipelines", &vocab());
        assert!(features.skills.contains("machine learning"));
    }

    #[test]
    fn test_experience_prefix_form() {
        assert_eq!(estimate_experience_years("Experience: 8 years"), 8);
    }

    #[test]
    fn test_experience_takes_maximum() {
        let text = "3 years of experience in Java. 7+ years of experience overall.";
        assert_eq!(estimate_experience_years(text), 7);
    }

    #[test]
    fn test_experience_from_year_range() {
        assert_eq!(estimate_experience_years("Acme Corp, 2018 - 2023"), 5);
    }

    #[test]
    fn test_experience_from_open_ended_range() {
        // "2019 - present" spans at least 6 years as of 2025
        assert!(estimate_experience_years("Acme Corp, 2019 - present") >= 6);
    }

    #[test]
    fn test_implausible_span_ignored() {
        assert_eq!(estimate_experience_years("founded 1950 - 2023"), 0);
    }

    #[test]
    fn test_no_experience_signal_is_zero() {
        assert_eq!(estimate_experience_years("Recent graduate, eager to learn"), 0);
    }

    #[test]
    fn test_email_extraction() {
        let features = extract("Contact: jane.doe@example.com", &vocab());
        assert_eq!(features.contact.email.as_deref(), Some("jane.doe@example.com"));
    }

    #[test]
    fn test_phone_extraction() {
        let features = extract("Call me at (555) 123-4567", &vocab());
        let phone = features.contact.phone.expect("phone found");
        let digits: usize = phone.chars().filter(|c| c.is_ascii_digit()).count();
        assert_eq!(digits, 10);
    }

    #[test]
    fn test_year_range_not_mistaken_for_phone() {
        let features = extract("Acme Corp, 2018 - 2023. No phone listed.", &vocab());
        assert_eq!(features.contact.phone, None);
    }

    #[test]
    fn test_contact_absence_is_valid() {
        let features = extract("Skills: Python", &vocab());
        assert_eq!(features.contact.email, None);
        assert_eq!(features.contact.phone, None);
    }

    #[test]
    fn test_education_markers() {
        let features = extract("Bachelor of Science in Computer Science", &vocab());
        assert!(features.education_markers.contains("bachelor"));
        assert!(features.education_markers.contains("computer science"));
    }

    #[test]
    fn test_features_roundtrip_serde() {
        let features = extract(SAMPLE, &vocab());
        let json = serde_json::to_value(&features).unwrap();
        let back: ResumeFeatures = serde_json::from_value(json).unwrap();
        assert_eq!(features, back);
    }
}
