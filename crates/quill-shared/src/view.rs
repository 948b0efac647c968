//! Template view models.

use quill_core::domain::Post;
use serde::Serialize;

/// A post as the templates see it.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub body: String,
    /// RFC 3339, for `<time datetime=...>`.
    pub created: String,
    /// Human-readable date, e.g. "Mon Oct 19 2026".
    pub created_display: String,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            image: post.image,
            body: post.body,
            created: post.created.to_rfc3339(),
            created_display: post.created.format("%a %b %d %Y").to_string(),
        }
    }
}
