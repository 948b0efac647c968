use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BlogError;

/// Post entity - a single blog post.
///
/// `id` and `created` are assigned by the store on insert and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

/// Fields supplied when creating a post. Absent form fields arrive here as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub image: String,
    pub body: String,
}

/// A partial update. `None` means "leave as is".
///
/// `id` and `created` are not mergeable and have no slot here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub image: Option<String>,
    pub body: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.image.is_none() && self.body.is_none()
    }

    /// Merge the supplied fields onto `post`.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(image) = self.image {
            post.image = image;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
    }
}

/// Identifier parsing for ids that arrive as raw path segments.
pub struct PostId;

impl PostId {
    pub fn parse(raw: &str) -> Result<Uuid, BlogError> {
        Uuid::parse_str(raw).map_err(|_| BlogError::InvalidId(raw.to_string()))
    }
}
