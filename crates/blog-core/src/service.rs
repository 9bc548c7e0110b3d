//! Post service - the entry point external callers use.

use std::sync::Arc;

use crate::domain::{DeleteResult, ListOptions, NewPost, Post, PostFilter, PostId, PostPatch};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Create, list, fetch, update and delete posts.
///
/// Missing posts are a normal outcome: `get_post_by_id` and `update_post`
/// return `None`, `delete_post` reports a zero count. Ids that are not in
/// the store's format are treated the same way. Every other store error is
/// returned untouched.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new post and return it with its generated id and timestamps.
    pub async fn create_post(&self, post: NewPost) -> Result<Post, DomainError> {
        let created = self.repo.insert(post).await?;
        tracing::debug!(post_id = %created.id, "Created post");
        Ok(created)
    }

    pub async fn list_all_posts(&self, options: ListOptions) -> Result<Vec<Post>, DomainError> {
        self.list_posts(PostFilter::All, options).await
    }

    /// Posts whose author equals `author` exactly.
    pub async fn list_posts_by_author(
        &self,
        author: &str,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        self.list_posts(PostFilter::Author(author.to_owned()), options)
            .await
    }

    /// Posts tagged with `tag`.
    pub async fn list_posts_by_tag(
        &self,
        tag: &str,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        self.list_posts(PostFilter::Tag(tag.to_owned()), options).await
    }

    pub async fn get_post_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Some(id) = Self::parse_id(id) else {
            return Ok(None);
        };
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Merge `patch` into an existing post. `id` and `created_at` never change.
    pub async fn update_post(
        &self,
        id: &str,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let Some(id) = Self::parse_id(id) else {
            return Ok(None);
        };

        let updated = self.repo.update_by_id(id, patch).await?;
        if updated.is_none() {
            tracing::debug!(post_id = %id, "Update matched no post");
        }
        Ok(updated)
    }

    pub async fn delete_post(&self, id: &str) -> Result<DeleteResult, DomainError> {
        let Some(id) = Self::parse_id(id) else {
            return Ok(DeleteResult::default());
        };

        let result = self.repo.delete_by_id(id).await?;
        tracing::debug!(post_id = %id, deleted = result.deleted_count, "Deleted post");
        Ok(result)
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        tracing::debug!(
            ?filter,
            sort_by = %options.sort_by,
            sort_order = %options.sort_order,
            "Listing posts"
        );
        Ok(self.repo.find_many(filter, options).await?)
    }

    fn parse_id(raw: &str) -> Option<PostId> {
        let id = PostId::parse(raw);
        if id.is_none() {
            tracing::warn!(post_id = %raw, "Malformed post id");
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{RepoError, ValidationError};
    use crate::ports::BaseRepository;

    /// Fails every call and counts how many reached it.
    #[derive(Default)]
    struct FailingRepository {
        calls: AtomicUsize,
    }

    impl FailingRepository {
        fn fail(&self) -> RepoError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            RepoError::Timeout("statement timeout".to_string())
        }
    }

    #[async_trait]
    impl BaseRepository<Post, PostId> for FailingRepository {
        async fn find_by_id(&self, _id: PostId) -> Result<Option<Post>, RepoError> {
            Err(self.fail())
        }

        async fn delete_by_id(&self, _id: PostId) -> Result<DeleteResult, RepoError> {
            Err(self.fail())
        }
    }

    #[async_trait]
    impl PostRepository for FailingRepository {
        async fn insert(&self, _post: NewPost) -> Result<Post, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RepoError::Validation(ValidationError::required("title")))
        }

        async fn update_by_id(
            &self,
            _id: PostId,
            _patch: PostPatch,
        ) -> Result<Option<Post>, RepoError> {
            Err(self.fail())
        }

        async fn find_many(
            &self,
            _filter: PostFilter,
            _options: ListOptions,
        ) -> Result<Vec<Post>, RepoError> {
            Err(self.fail())
        }
    }

    fn service() -> (Arc<FailingRepository>, PostService) {
        let repo = Arc::new(FailingRepository::default());
        (repo.clone(), PostService::new(repo))
    }

    #[tokio::test]
    async fn test_malformed_ids_never_reach_the_store() {
        let (repo, service) = service();

        assert!(service.get_post_by_id("000000000000000000000000").await.unwrap().is_none());
        assert!(
            service
                .update_post("nope", PostPatch::default())
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(service.delete_post("nope").await.unwrap().deleted_count, 0);
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unchanged() {
        let (repo, service) = service();
        let id = PostId::generate().to_string();

        let err = service.get_post_by_id(&id).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(RepoError::Timeout(_))));

        let err = service.list_all_posts(ListOptions::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(RepoError::Timeout(_))));

        let err = service.delete_post(&id).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(RepoError::Timeout(_))));

        assert_eq!(repo.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_validation_errors_surface_as_validation() {
        let (_repo, service) = service();

        let err = service.create_post(NewPost::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ValidationError { field: "title", .. })));
    }
}
