use async_trait::async_trait;

use crate::domain::{DeleteResult, ListOptions, NewPost, Post, PostFilter, PostId, PostPatch};
use crate::error::RepoError;

/// Generic repository trait shared by every stored entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID, or `None` if it does not exist.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. A missing entity reports a zero count.
    async fn delete_by_id(&self, id: ID) -> Result<DeleteResult, RepoError>;
}

/// Post document store.
///
/// Implementations own the physical schema. They must run the domain
/// validation before any write, assign `id`, `created_at` and `updated_at`
/// on insert, and refresh `updated_at` on every update.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Validate and persist a new post.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Merge `patch` into the stored post. `None` when `id` does not exist.
    async fn update_by_id(&self, id: PostId, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// All posts matching `filter`, ordered by `options`.
    async fn find_many(&self, filter: PostFilter, options: ListOptions) -> Result<Vec<Post>, RepoError>;
}
