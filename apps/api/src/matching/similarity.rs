//! Cosine similarity between vectors of one shared space.

use crate::errors::AppError;
use crate::matching::vectorizer::{DocumentVector, VectorSpace};

/// Cosine similarity in [0, 1] between two vectors built from `space`.
///
/// Comparing vectors from different builds is a caller bug and fails with
/// `InvalidVectorSpace` rather than returning a silently wrong number.
/// Two all-zero vectors share no signal and score 0.0, never NaN.
pub fn similarity(
    a: &DocumentVector,
    b: &DocumentVector,
    space: &VectorSpace,
) -> Result<f64, AppError> {
    if a.space_id() != space.build_id() || b.space_id() != space.build_id() {
        return Err(AppError::InvalidVectorSpace(format!(
            "vectors from builds {} / {} compared against space {}",
            a.space_id(),
            b.space_id(),
            space.build_id()
        )));
    }

    if a.is_zero() || b.is_zero() {
        return Ok(0.0);
    }

    // Vectors are L2-normalized at build time, so the dot product is the
    // cosine. Iterate the sparser side.
    let (small, large) = if a.weights().len() <= b.weights().len() {
        (a, b)
    } else {
        (b, a)
    };
    let dot: f64 = small
        .weights()
        .iter()
        .filter_map(|(term, w)| large.weights().get(term).map(|v| w * v))
        .sum();

    Ok(dot.clamp(0.0, 1.0))
}
