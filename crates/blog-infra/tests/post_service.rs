//! Post service behaviour over the in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

use blog_core::domain::{ListOptions, NewPost, Post, PostId, PostPatch, SortField, SortOrder};
use blog_core::ports::Clock;
use blog_core::{DomainError, PostService};
use blog_infra::InMemoryPostRepository;

/// Advances one second every time it is read.
struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

fn service() -> PostService {
    let repo = InMemoryPostRepository::with_clock(Arc::new(SteppingClock::new()));
    PostService::new(Arc::new(repo))
}

fn sample_posts() -> Vec<NewPost> {
    vec![
        NewPost::titled("Test 1")
            .with_author("Paul Setzer")
            .with_tags(["test1"]),
        NewPost::titled("Test 2")
            .with_author("Paul Setzer")
            .with_tags(["test2"]),
        NewPost::titled("Test 3")
            .with_author("Paul Setzer")
            .with_tags(["test3"]),
        NewPost::titled("Test 4"),
    ]
}

async fn seeded() -> (PostService, Vec<Post>) {
    let service = service();
    let mut created = Vec::new();
    for post in sample_posts() {
        created.push(service.create_post(post).await.unwrap());
    }
    (service, created)
}

fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_create_with_all_fields_round_trips() {
    let service = service();
    let post = NewPost::titled("Test Title")
        .with_author("Test Author")
        .with_contents("This is a test post with all fields filled in")
        .with_tags(["mongoose", "mongodb"]);

    let created = service.create_post(post).await.unwrap();
    assert_eq!(created.created_at, created.updated_at);

    let found = service
        .get_post_by_id(&created.id.to_string())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found, created);
    assert_eq!(found.title, "Test Title");
    assert_eq!(found.author.as_deref(), Some("Test Author"));
    assert_eq!(
        found.contents.as_deref(),
        Some("This is a test post with all fields filled in")
    );
    assert_eq!(found.tags, vec!["mongoose".to_owned(), "mongodb".to_owned()]);
}

#[tokio::test]
async fn test_create_without_title_fails_and_persists_nothing() {
    let service = service();
    let post = NewPost {
        author: Some("Test Author".to_owned()),
        contents: Some("This is a test with no title".to_owned()),
        tags: Some(vec!["empty".to_owned()]),
        ..NewPost::default()
    };

    let err = service.create_post(post).await.unwrap_err();
    match err {
        DomainError::Validation(err) => {
            assert_eq!(err.field, "title");
            assert!(err.to_string().contains("`title` is required"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let err = service.create_post(NewPost::titled("")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let all = service.list_all_posts(ListOptions::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_create_with_minimal_fields() {
    let service = service();
    let created = service
        .create_post(NewPost::titled("Only a title"))
        .await
        .unwrap();

    assert!(created.author.is_none());
    assert!(created.contents.is_none());
    assert!(created.tags.is_empty());
}

#[tokio::test]
async fn test_list_returns_all_posts_newest_first() {
    let (service, created) = seeded().await;

    let posts = service.list_all_posts(ListOptions::default()).await.unwrap();
    assert_eq!(posts.len(), created.len());
    assert_eq!(titles(&posts), ["Test 4", "Test 3", "Test 2", "Test 1"]);
}

#[tokio::test]
async fn test_list_honours_sort_options() {
    let (service, created) = seeded().await;

    service
        .update_post(
            &created[1].id.to_string(),
            PostPatch {
                contents: Some("edited".to_owned()),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    let options = ListOptions::parse(Some("updatedAt"), Some("ascending")).unwrap();
    let posts = service.list_all_posts(options).await.unwrap();

    assert!(posts.windows(2).all(|w| w[0].updated_at <= w[1].updated_at));
    assert_eq!(posts.last().unwrap().title, "Test 2");

    let by_title = service
        .list_all_posts(ListOptions::new(SortField::Title, SortOrder::Ascending))
        .await
        .unwrap();
    assert_eq!(titles(&by_title), ["Test 1", "Test 2", "Test 3", "Test 4"]);
}

#[tokio::test]
async fn test_filter_by_author() {
    let (service, _) = seeded().await;

    let posts = service
        .list_posts_by_author("Paul Setzer", ListOptions::default())
        .await
        .unwrap();
    assert_eq!(posts.len(), 3);
    assert!(posts.iter().all(|p| p.author.as_deref() == Some("Paul Setzer")));
    assert_eq!(titles(&posts), ["Test 3", "Test 2", "Test 1"]);

    let none = service
        .list_posts_by_author("paul setzer", ListOptions::default())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_filter_by_tag() {
    let (service, _) = seeded().await;

    let posts = service
        .list_posts_by_tag("test1", ListOptions::default())
        .await
        .unwrap();
    assert_eq!(titles(&posts), ["Test 1"]);

    let none = service
        .list_posts_by_tag("test", ListOptions::default())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_get_returns_full_post() {
    let (service, created) = seeded().await;

    let post = service
        .get_post_by_id(&created[0].id.to_string())
        .await
        .unwrap();
    assert_eq!(post.as_ref(), Some(&created[0]));
}

#[tokio::test]
async fn test_get_missing_or_malformed_id_is_none() {
    let (service, _) = seeded().await;

    let missing = PostId::generate().to_string();
    assert!(service.get_post_by_id(&missing).await.unwrap().is_none());
    assert!(
        service
            .get_post_by_id("000000000000000000000000")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let (service, created) = seeded().await;
    let original = &created[0];

    let updated = service
        .update_post(
            &original.id.to_string(),
            PostPatch {
                author: Some("Test Author".to_owned()),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.author.as_deref(), Some("Test Author"));
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.title, "Test 1");
    assert_eq!(updated.contents, original.contents);
    assert_eq!(updated.tags, original.tags);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);

    let stored = service
        .get_post_by_id(&original.id.to_string())
        .await
        .unwrap();
    assert_eq!(stored, Some(updated));
}

#[tokio::test]
async fn test_repeated_updates_keep_advancing_updated_at() {
    let (service, created) = seeded().await;
    let id = created[2].id.to_string();

    let mut last = created[2].updated_at;
    for n in 0..3 {
        let patch = PostPatch {
            tags: Some(vec![format!("round{n}")]),
            ..PostPatch::default()
        };
        let updated = service.update_post(&id, patch).await.unwrap().unwrap();
        assert!(updated.updated_at > last);
        assert!(updated.created_at <= updated.updated_at);
        last = updated.updated_at;
    }
}

#[tokio::test]
async fn test_update_rejects_blank_title() {
    let (service, created) = seeded().await;

    let err = service
        .update_post(
            &created[0].id.to_string(),
            PostPatch {
                title: Some(String::new()),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let stored = service
        .get_post_by_id(&created[0].id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "Test 1");
}

#[tokio::test]
async fn test_update_missing_id_is_none() {
    let (service, _) = seeded().await;

    let patch = PostPatch {
        author: Some("Test Author".to_owned()),
        ..PostPatch::default()
    };
    let result = service
        .update_post(&PostId::generate().to_string(), patch.clone())
        .await
        .unwrap();
    assert!(result.is_none());

    let result = service
        .update_post("000000000000000000000000", patch)
        .await
        .unwrap();
    assert!(result.is_none());

    let blank = PostPatch {
        title: Some(String::new()),
        ..PostPatch::default()
    };
    let result = service
        .update_post(&PostId::generate().to_string(), blank)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_removes_post() {
    let (service, created) = seeded().await;
    let id = created[0].id.to_string();

    let result = service.delete_post(&id).await.unwrap();
    assert_eq!(result.deleted_count, 1);
    assert!(service.get_post_by_id(&id).await.unwrap().is_none());

    let remaining = service.list_all_posts(ListOptions::default()).await.unwrap();
    assert_eq!(remaining.len(), 3);
}

#[tokio::test]
async fn test_delete_missing_id_reports_zero() {
    let (service, _) = seeded().await;

    let result = service
        .delete_post(&PostId::generate().to_string())
        .await
        .unwrap();
    assert_eq!(result.deleted_count, 0);

    let result = service.delete_post("000000000000000000000000").await.unwrap();
    assert_eq!(result.deleted_count, 0);
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let service = PostService::new(Arc::new(InMemoryPostRepository::new()));

    let creates = (0..32).map(|n| {
        let service = service.clone();
        async move { service.create_post(NewPost::titled(format!("Post {n}"))).await }
    });
    let created = futures::future::join_all(creates).await;

    let mut ids: Vec<PostId> = created.into_iter().map(|r| r.unwrap().id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}
