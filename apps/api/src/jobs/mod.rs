//! Job posting CRUD.

pub mod handlers;
