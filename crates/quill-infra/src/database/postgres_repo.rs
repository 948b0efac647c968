//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new_post.into();
        let model = active.insert(self.conn()).await.map_err(repo_error)?;

        tracing::debug!(post_id = %model.id, "Inserted post");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(repo_error)?
            .ok_or(RepoError::NotFound)?;

        if changes.is_empty() {
            return Ok(existing.into());
        }

        // Only the three mutable columns are ever marked as set.
        let mut active: post::ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(image) = changes.image {
            active.image = Set(image);
        }
        if let Some(body) = changes.body {
            active.body = Set(body);
        }

        let model = active.update(self.conn()).await.map_err(repo_error)?;
        Ok(model.into())
    }
}
