//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the post model, the blog resource service and the
//! ports it talks to, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{BlogError, RepoError};
pub use service::BlogService;
