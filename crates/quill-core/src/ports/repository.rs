use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Generic repository trait defining the id-keyed operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// The store owns identity: `insert` assigns `id` and `created`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, ordered by `created` ascending.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a new post and return it with its store-assigned fields.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Merge `changes` onto the post with `id` and persist it.
    /// Returns `RepoError::NotFound` when no such post exists.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;
}
