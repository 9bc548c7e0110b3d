//! Map-backed post store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{
    DeleteResult, ListOptions, NewPost, Post, PostFilter, PostId, PostPatch, validate_new_post,
    validate_patch,
};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, Clock, PostRepository, SystemClock};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Writes hold the lock across the whole read-modify-write of one post.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: PostId) -> Result<DeleteResult, RepoError> {
        let removed = self.posts.write().await.remove(&id);
        Ok(DeleteResult::new(u64::from(removed.is_some())))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = validate_new_post(post)?;
        let now = self.clock.now();

        let created = Post {
            id: PostId::generate(),
            title: post.title,
            author: post.author,
            contents: post.contents,
            tags: post.tags,
            created_at: now,
            updated_at: now,
        };

        self.posts.write().await.insert(created.id, created.clone());
        tracing::debug!(post_id = %created.id, "Inserted post in memory");

        Ok(created)
    }

    async fn update_by_id(&self, id: PostId, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };
        validate_patch(&patch)?;

        let updated_at = self.clock.next_after(post.updated_at);
        patch.apply_to(post);
        post.updated_at = updated_at;

        Ok(Some(post.clone()))
    }

    async fn find_many(
        &self,
        filter: PostFilter,
        options: ListOptions,
    ) -> Result<Vec<Post>, RepoError> {
        let mut result: Vec<Post> = self
            .posts
            .read()
            .await
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect();

        result.sort_by(|a, b| options.compare(a, b));
        Ok(result)
    }
}
