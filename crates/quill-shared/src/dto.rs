//! Data Transfer Objects - request types for the blog routes.

use quill_core::domain::{NewPost, PostChanges};
use serde::{Deserialize, Serialize};

/// Post fields as submitted by the new/edit forms.
///
/// Every field is optional and unknown keys (`id`, `created`, `_method`, ...)
/// are ignored, so callers can never smuggle store-owned fields through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    pub title: Option<String>,
    pub image: Option<String>,
    pub body: Option<String>,
}

impl PostForm {
    /// Absent fields become empty strings.
    pub fn into_new_post(self) -> NewPost {
        NewPost {
            title: self.title.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
        }
    }

    /// Absent fields mean "no change".
    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: self.title,
            image: self.image,
            body: self.body,
        }
    }
}
