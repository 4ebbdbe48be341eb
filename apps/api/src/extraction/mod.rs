//! Resume ingestion: raw text extraction from uploads and structured
//! feature extraction from plain text.

pub mod features;
pub mod handlers;
pub mod text;
pub mod vocabulary;
