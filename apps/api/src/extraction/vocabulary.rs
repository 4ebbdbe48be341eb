//! Skill and education vocabularies plus the text normalization they share.
//!
//! Matching policy: word-boundary, not substring. The normalized form of a
//! term must appear as a whole-token run in the normalized text, so "java"
//! does not match inside "javascript". The same normalization is applied to
//! resume text and to job required skills, keeping the skill-overlap ratio
//! internally consistent.

/// Normalizes free text for matching: lowercase, every character that is not
/// alphanumeric, `+`, or `#` becomes a space, whitespace collapsed.
/// Keeping `+` and `#` preserves terms like `c++` and `c#`.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '+' || c == '#' {
                c
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True if `term` (already normalized) occurs as a whole-token run inside
/// `haystack` (already normalized). Multi-word terms match as a sequence.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() || haystack.is_empty() {
        return false;
    }
    let padded_hay = format!(" {haystack} ");
    let padded_term = format!(" {term} ");
    padded_hay.contains(&padded_term)
}

/// Injectable skill vocabulary: canonical skill names matched against resume
/// text. Held in `AppState` so tests and deployments can supply their own
/// list without recompiling the extractor.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from arbitrary terms; each is normalized and
    /// blank entries are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = terms
            .into_iter()
            .map(|t| normalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        out.sort();
        out.dedup();
        SkillVocabulary { terms: out }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        SkillVocabulary::new(DEFAULT_SKILLS.iter().copied())
    }
}

/// Built-in skill list covering the common software stack. Multi-word
/// entries are allowed and match as token sequences.
const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "react", "angular", "vue",
    "node", "html", "css", "sql", "postgresql", "mysql", "mongodb", "redis",
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins",
    "git", "linux", "machine learning", "deep learning", "tensorflow",
    "pytorch", "nlp", "data science", "pandas", "numpy", "scikit-learn",
    "django", "flask", "spring boot", "c++", "c#", "php", "ruby", "go",
    "rust", "swift", "kotlin", "scala", "r", "matlab", "excel", "tableau",
    "power bi", "agile", "scrum", "devops", "ci/cd", "rest api", "graphql",
    "microservices", "blockchain", "cybersecurity",
];

/// Education marker vocabulary: degree levels and common fields, stored in
/// normalized form.
pub const EDUCATION_MARKERS: &[&str] = &[
    "bachelor",
    "bachelors",
    "master",
    "masters",
    "phd",
    "ph d",
    "doctorate",
    "mba",
    "bsc",
    "msc",
    "b tech",
    "m tech",
    "degree",
    "diploma",
    "certification",
    "computer science",
    "engineering",
    "mathematics",
    "physics",
    "statistics",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn test_normalize_keeps_plus_and_hash() {
        assert_eq!(normalize("C++ and C#"), "c++ and c#");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn test_contains_term_word_boundary() {
        let hay = normalize("Expert in JavaScript development");
        assert!(contains_term(&hay, "javascript"));
        // "java" must not match inside "javascript"
        assert!(!contains_term(&hay, "java"));
    }

    #[test]
    fn test_contains_term_multi_word() {
        let hay = normalize("Applied machine learning to fraud detection");
        assert!(contains_term(&hay, "machine learning"));
        assert!(!contains_term(&hay, "deep learning"));
    }

    #[test]
    fn test_contains_term_empty_inputs() {
        assert!(!contains_term("", "rust"));
        assert!(!contains_term("rust", ""));
    }

    #[test]
    fn test_vocabulary_normalizes_and_dedups() {
        let vocab = SkillVocabulary::new(["Python", "python", "  ", "SQL"]);
        assert_eq!(vocab.terms(), &["python", "sql"]);
    }

    #[test]
    fn test_default_vocabulary_nonempty() {
        assert!(!SkillVocabulary::default().terms().is_empty());
    }
}
