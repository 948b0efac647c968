//! # Quill Shared
//!
//! Boundary types: what arrives from HTML forms, what templates receive,
//! and the problem-details body used for the few real error responses.

pub mod dto;
pub mod response;
pub mod view;

pub use dto::PostForm;
pub use response::ErrorResponse;
pub use view::PostView;
