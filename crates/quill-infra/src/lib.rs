//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the post store integrations and the body sanitizer.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database driver, in-memory store only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod database;
pub mod sanitize;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use sanitize::{HtmlSanitizer, strip_tags};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
