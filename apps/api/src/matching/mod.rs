//! The matching engine: TF-IDF vectorization, cosine similarity, and the
//! weighted match scorer. Everything here is a pure in-memory transform over
//! an immutable per-request corpus snapshot; only `engine` touches the store.

pub mod engine;
pub mod handlers;
pub mod scorer;
pub mod similarity;
pub mod vectorizer;
