//! TF-IDF vectorization over a corpus snapshot.
//!
//! One `build` produces a `VectorSpace` (term -> smoothed IDF, tagged with a
//! unique build id) and one L2-normalized `DocumentVector` per input
//! document, aligned 1:1 with the corpus order. Vectors are only comparable
//! within the space they were built from; the build id enforces that at the
//! similarity boundary.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::extraction::vocabulary::normalize;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "for",
    "from", "had", "has", "have", "he", "her", "his", "i", "in", "is", "it",
    "its", "my", "no", "not", "of", "on", "or", "our", "she", "so", "that",
    "the", "their", "them", "they", "this", "to", "was", "we", "were", "will",
    "with", "you", "your",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Shared lexical space for one corpus snapshot. Never persisted; lives for
/// one matching request.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    build_id: Uuid,
    idf: HashMap<String, f64>,
    corpus_size: usize,
}

impl VectorSpace {
    pub fn build_id(&self) -> Uuid {
        self.build_id
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }
}

/// Sparse tf-idf vector, L2-normalized, tied to the space it was built from.
#[derive(Debug, Clone)]
pub struct DocumentVector {
    space_id: Uuid,
    weights: HashMap<String, f64>,
}

impl DocumentVector {
    pub fn space_id(&self) -> Uuid {
        self.space_id
    }

    pub fn weights(&self) -> &HashMap<String, f64> {
        &self.weights
    }

    /// An empty document vectorizes to the zero vector, not an error.
    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Lowercases, drops stop words, and emits unigrams plus adjacent-pair
/// bigrams as the term universe.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized
        .split(' ')
        .filter(|w| !w.is_empty() && !STOP_WORD_SET.contains(w))
        .collect();

    let mut terms: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    for pair in words.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// Builds the shared vector space and one vector per document, aligned with
/// the corpus order. Deterministic for an identical corpus (same texts, same
/// order). Weighting is tf x smoothed idf, `ln((1 + N) / (1 + df)) + 1`, so
/// a single-document corpus and terms present in every document both get a
/// positive weight instead of dividing by zero.
pub fn build<S: AsRef<str>>(corpus: &[S]) -> (VectorSpace, Vec<DocumentVector>) {
    let build_id = Uuid::new_v4();
    let n = corpus.len();

    let doc_terms: Vec<Vec<String>> = corpus.iter().map(|d| tokenize(d.as_ref())).collect();

    // Document frequency per term
    let mut df: HashMap<String, usize> = HashMap::new();
    for terms in &doc_terms {
        let unique: HashSet<&String> = terms.iter().collect();
        for term in unique {
            *df.entry(term.clone()).or_insert(0) += 1;
        }
    }

    let idf: HashMap<String, f64> = df
        .into_iter()
        .map(|(term, df)| {
            let weight = ((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0;
            (term, weight)
        })
        .collect();

    let vectors = doc_terms
        .into_iter()
        .map(|terms| {
            let mut counts: HashMap<String, f64> = HashMap::new();
            for term in terms {
                *counts.entry(term).or_insert(0.0) += 1.0;
            }

            let mut weights: HashMap<String, f64> = counts
                .into_iter()
                .map(|(term, tf)| {
                    let w = tf * idf.get(&term).copied().unwrap_or(0.0);
                    (term, w)
                })
                .collect();

            // L2-normalize so cosine similarity reduces to a dot product
            let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for w in weights.values_mut() {
                    *w /= norm;
                }
            }

            DocumentVector {
                space_id: build_id,
                weights,
            }
        })
        .collect();

    (
        VectorSpace {
            build_id,
            idf,
            corpus_size: n,
        },
        vectors,
    )
}
