//! Lumia Library — knowledge-base ingestion and selection resolution.
//!
//! Converts semi-structured knowledge-base documents into a normalized,
//! queryable library of character definitions ("Lumia" records) and
//! standalone narrative fragments ("Loom" records), then resolves
//! name-based selections into final text with nested macro expansion
//! and dominant-tag annotation.

pub mod core;
pub mod schema;
