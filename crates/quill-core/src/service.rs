//! The blog resource service - CRUD over posts.
//!
//! Every call reads from the store; nothing is cached between requests.
//! Results are typed so callers can log the failure kind before collapsing
//! it into whatever response policy they follow.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::BlogError;
use crate::ports::{BodySanitizer, PostRepository};

#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    sanitizer: Arc<dyn BodySanitizer>,
}

impl BlogService {
    pub fn new(posts: Arc<dyn PostRepository>, sanitizer: Arc<dyn BodySanitizer>) -> Self {
        Self { posts, sanitizer }
    }

    /// All posts in store order (`created` ascending).
    pub async fn list(&self) -> Result<Vec<Post>, BlogError> {
        Ok(self.posts.list().await?)
    }

    /// Sanitize the body and insert. The store assigns `id` and `created`.
    pub async fn create(&self, mut post: NewPost) -> Result<Post, BlogError> {
        post.body = self.sanitizer.sanitize(&post.body);
        let post = self.posts.insert(post).await?;
        tracing::debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn show(&self, raw_id: &str) -> Result<Post, BlogError> {
        let id = PostId::parse(raw_id)?;
        self.posts
            .find_by_id(id)
            .await
            .map_err(|e| BlogError::from_repo(id, e))?
            .ok_or(BlogError::NotFound { id })
    }

    /// Lookup for the edit form. Same contract as `show`.
    pub async fn edit_form(&self, raw_id: &str) -> Result<Post, BlogError> {
        self.show(raw_id).await
    }

    pub async fn update(&self, raw_id: &str, mut changes: PostChanges) -> Result<Post, BlogError> {
        let id = PostId::parse(raw_id)?;
        if let Some(body) = changes.body.take() {
            changes.body = Some(self.sanitizer.sanitize(&body));
        }
        let post = self
            .posts
            .update(id, changes)
            .await
            .map_err(|e| BlogError::from_repo(id, e))?;
        tracing::debug!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), BlogError> {
        let id = PostId::parse(raw_id)?;
        self.posts
            .delete(id)
            .await
            .map_err(|e| BlogError::from_repo(id, e))?;
        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }
}
