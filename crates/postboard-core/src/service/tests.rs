use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::RwLock;

use super::{PostService, ServiceConfig};
use crate::domain::{Post, PostPayload, Principal, Reaction};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, IdGenerator, PostMap};

/// Map double keyed like the real adapters.
#[derive(Default)]
struct TestMap {
    entries: RwLock<BTreeMap<String, Post>>,
}

#[async_trait]
impl PostMap for TestMap {
    async fn get(&self, id: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Option<Post>, RepoError> {
        Ok(self.entries.write().await.insert(post.id.clone(), post))
    }

    async fn remove(&self, id: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.entries.write().await.remove(id))
    }

    async fn values(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn items(&self) -> Result<Vec<(String, Post)>, RepoError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn len(&self) -> Result<usize, RepoError> {
        Ok(self.entries.read().await.len())
    }
}

/// Clock that moves one second forward on every reading.
struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicU64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick as i64)
    }
}

struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("post-{:04}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

fn service_with(config: ServiceConfig) -> (PostService, Arc<TestMap>) {
    let map = Arc::new(TestMap::default());
    let clock = SteppingClock {
        start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ticks: AtomicU64::new(0),
    };
    let service = PostService::new(
        map.clone(),
        Arc::new(clock),
        Arc::new(SequentialIds(AtomicU64::new(1))),
        config,
    );
    (service, map)
}

fn service() -> PostService {
    service_with(ServiceConfig::default()).0
}

fn payload(title: &str, content: &str) -> PostPayload {
    PostPayload {
        title: title.to_string(),
        content: content.to_string(),
        image: format!("{title}.png"),
    }
}

fn alice() -> Principal {
    Principal::from("alice")
}

fn bob() -> Principal {
    Principal::from("bob")
}

#[tokio::test]
async fn test_create_then_get_returns_same_record() {
    let service = service();

    let created = service
        .create_post(payload("Hello", "World"), &alice())
        .await
        .unwrap();
    let fetched = service.get_post(&created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(created.author, alice());
    assert_eq!(created.likes(), 0);
    assert_eq!(created.dislikes(), 0);
    assert!(created.comments().is_empty());
    assert!(created.updated_at.is_none());
}

#[tokio::test]
async fn test_get_missing_post() {
    let service = service();
    let err = service.get_post("nope").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_posts() {
    let service = service();
    assert!(service.list_posts().await.unwrap().is_empty());

    service.create_post(payload("a", ""), &alice()).await.unwrap();
    service.create_post(payload("b", ""), &bob()).await.unwrap();

    let titles: Vec<String> = service
        .list_posts()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["a", "b"]);
}

#[tokio::test]
async fn test_update_by_author() {
    let service = service();
    let post = service.create_post(payload("Old", "Body"), &alice()).await.unwrap();

    let updated = service
        .update_post(&post.id, payload("New", "Changed"), &alice())
        .await
        .unwrap();

    assert_eq!(updated.title, "New");
    assert_eq!(updated.content, "Changed");
    assert_eq!(updated.image, "New.png");
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at.unwrap() > post.created_at);
    assert_eq!(service.get_post(&post.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_by_non_author_leaves_record_unchanged() {
    let service = service();
    let post = service.create_post(payload("Old", "Body"), &alice()).await.unwrap();

    let err = service
        .update_post(&post.id, payload("Hijacked", ""), &bob())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Unauthorized(_)));
    assert_eq!(service.get_post(&post.id).await.unwrap(), post);
}

#[tokio::test]
async fn test_update_missing_post() {
    let service = service();
    let err = service
        .update_post("nope", payload("x", "y"), &alice())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_then_get_fails() {
    let service = service();
    let post = service.create_post(payload("Bye", ""), &alice()).await.unwrap();

    let deleted = service.delete_post(&post.id, &alice()).await.unwrap();
    assert_eq!(deleted, post);

    let err = service.get_post(&post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_by_non_author_keeps_record() {
    let (service, map) = service_with(ServiceConfig::default());
    let post = service.create_post(payload("Mine", ""), &alice()).await.unwrap();

    let err = service.delete_post(&post.id, &bob()).await.unwrap_err();

    assert!(matches!(err, DomainError::Unauthorized(_)));
    assert_eq!(map.len().await.unwrap(), 1);
    assert_eq!(service.get_post(&post.id).await.unwrap(), post);
}

#[tokio::test]
async fn test_delete_missing_post() {
    let service = service();
    let err = service.delete_post("nope", &alice()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_anyone_can_comment() {
    let service = service();
    let post = service.create_post(payload("Topic", ""), &alice()).await.unwrap();

    let first = service
        .add_comment(&post.id, "first!".to_string(), &bob())
        .await
        .unwrap();
    service
        .add_comment(&post.id, "thanks".to_string(), &alice())
        .await
        .unwrap();

    assert_eq!(first.author, bob());
    let stored = service.get_post(&post.id).await.unwrap();
    let contents: Vec<&str> = stored.comments().iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["first!", "thanks"]);
    assert_eq!(stored.comments()[0], first);
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let service = service();
    let err = service
        .add_comment("nope", "hi".to_string(), &bob())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_double_like_conflicts_and_keeps_count() {
    let service = service();
    let post = service.create_post(payload("Like me", ""), &alice()).await.unwrap();

    assert_eq!(service.like_post(&post.id, &bob()).await.unwrap(), 1);
    let err = service.like_post(&post.id, &bob()).await.unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)));
    assert_eq!(service.get_post(&post.id).await.unwrap().likes(), 1);
}

#[tokio::test]
async fn test_like_then_dislike_moves_reaction() {
    let service = service();
    let post = service.create_post(payload("Hmm", ""), &alice()).await.unwrap();
    service.like_post(&post.id, &alice()).await.unwrap();
    service.like_post(&post.id, &bob()).await.unwrap();

    let before = service.get_post(&post.id).await.unwrap();
    let dislikes = service.dislike_post(&post.id, &bob()).await.unwrap();
    let after = service.get_post(&post.id).await.unwrap();

    assert_eq!(dislikes, before.dislikes() + 1);
    assert_eq!(after.likes(), before.likes() - 1);
    assert_eq!(after.dislikes(), before.dislikes() + 1);
    assert_eq!(after.disliked(), vec![&bob()]);
    assert_eq!(after.liked(), vec![&alice()]);
}

#[tokio::test]
async fn test_dislike_then_like_switches_back() {
    let service = service();
    let post = service.create_post(payload("Hmm", ""), &alice()).await.unwrap();

    assert_eq!(service.dislike_post(&post.id, &bob()).await.unwrap(), 1);
    assert!(matches!(
        service.dislike_post(&post.id, &bob()).await.unwrap_err(),
        DomainError::Conflict(_)
    ));
    assert_eq!(service.like_post(&post.id, &bob()).await.unwrap(), 1);

    let stored = service.get_post(&post.id).await.unwrap();
    assert_eq!(stored.dislikes(), 0);
    assert_eq!(
        service.reaction_of(&post.id, &bob()).await.unwrap(),
        Some(Reaction::Liked)
    );
}

#[tokio::test]
async fn test_unlike_without_like_conflicts() {
    let service = service();
    let post = service.create_post(payload("Meh", ""), &alice()).await.unwrap();

    let err = service.unlike_post(&post.id, &bob()).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    service.like_post(&post.id, &bob()).await.unwrap();
    assert_eq!(service.unlike_post(&post.id, &bob()).await.unwrap(), 0);
    assert_eq!(service.reaction_of(&post.id, &bob()).await.unwrap(), None);
}

#[tokio::test]
async fn test_undislike() {
    let service = service();
    let post = service.create_post(payload("Meh", ""), &alice()).await.unwrap();

    assert!(service.undislike_post(&post.id, &bob()).await.is_err());
    service.dislike_post(&post.id, &bob()).await.unwrap();
    assert_eq!(service.undislike_post(&post.id, &bob()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_reactions_on_missing_post() {
    let service = service();
    for result in [
        service.like_post("nope", &bob()).await,
        service.unlike_post("nope", &bob()).await,
        service.dislike_post("nope", &bob()).await,
        service.undislike_post("nope", &bob()).await,
    ] {
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}

#[tokio::test]
async fn test_posts_by_author() {
    let service = service();
    service.create_post(payload("a1", ""), &alice()).await.unwrap();
    service.create_post(payload("b1", ""), &bob()).await.unwrap();
    service.create_post(payload("a2", ""), &alice()).await.unwrap();

    let posts = service.get_posts_by_author(&alice()).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.author == alice()));

    let err = service
        .get_posts_by_author(&Principal::from("carol"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoResults(_)));
}

#[tokio::test]
async fn test_search() {
    let service = service();
    service
        .create_post(payload("Rust tips", "use the borrow checker"), &alice())
        .await
        .unwrap();
    service
        .create_post(payload("Gardening", "Tomatoes love RUST-free tools"), &bob())
        .await
        .unwrap();
    service
        .create_post(payload("Cooking", "pasta"), &bob())
        .await
        .unwrap();

    assert_eq!(service.search_posts("rust").await.unwrap().len(), 2);
    assert_eq!(service.search_posts("PASTA").await.unwrap().len(), 1);
    assert_eq!(service.search_posts("").await.unwrap().len(), 3);

    let err = service.search_posts("xyz").await.unwrap_err();
    assert!(matches!(err, DomainError::NoResults(_)));
}

#[tokio::test]
async fn test_empty_results_as_success() {
    let (service, _) = service_with(ServiceConfig {
        empty_results_as_error: false,
    });
    service.create_post(payload("Rust", ""), &alice()).await.unwrap();

    assert!(service.search_posts("xyz").await.unwrap().is_empty());
    assert!(
        service
            .get_posts_by_author(&bob())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_statistics_on_empty_store() {
    let service = service();
    assert!(matches!(
        service.compute_statistics().await.unwrap_err(),
        DomainError::NoResults(_)
    ));
    assert!(matches!(
        service.most_liked_post().await.unwrap_err(),
        DomainError::NoResults(_)
    ));
    assert!(matches!(
        service.most_disliked_post().await.unwrap_err(),
        DomainError::NoResults(_)
    ));
    assert!(matches!(
        service.unique_author_count().await.unwrap_err(),
        DomainError::NoResults(_)
    ));
}

#[tokio::test]
async fn test_statistics_single_author() {
    let service = service();
    for title in ["a", "b", "c", "d"] {
        service.create_post(payload(title, ""), &alice()).await.unwrap();
    }

    let stats = service.compute_statistics().await.unwrap();
    assert_eq!(stats.total_posts, 4);
    assert_eq!(stats.unique_authors, 1);
    assert_eq!(service.unique_author_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_statistics_picks_most_reacted() {
    let service = service();
    let first = service.create_post(payload("a", ""), &alice()).await.unwrap();
    let second = service.create_post(payload("b", ""), &bob()).await.unwrap();

    service.like_post(&second.id, &alice()).await.unwrap();
    service.dislike_post(&first.id, &bob()).await.unwrap();

    let stats = service.compute_statistics().await.unwrap();
    assert_eq!(stats.unique_authors, 2);
    assert_eq!(stats.most_liked_post.id, second.id);
    assert_eq!(stats.most_disliked_post.id, first.id);
    assert_eq!(service.most_liked_post().await.unwrap().id, second.id);
    assert_eq!(service.most_disliked_post().await.unwrap().id, first.id);
}

/// Map whose count still includes a post that a concurrent delete already removed.
struct LaggingCountMap;

#[async_trait]
impl PostMap for LaggingCountMap {
    async fn get(&self, _id: &str) -> Result<Option<Post>, RepoError> {
        Ok(None)
    }

    async fn insert(&self, _post: Post) -> Result<Option<Post>, RepoError> {
        Ok(None)
    }

    async fn remove(&self, _id: &str) -> Result<Option<Post>, RepoError> {
        Ok(None)
    }

    async fn values(&self) -> Result<Vec<Post>, RepoError> {
        Ok(Vec::new())
    }

    async fn items(&self) -> Result<Vec<(String, Post)>, RepoError> {
        Ok(Vec::new())
    }

    async fn len(&self) -> Result<usize, RepoError> {
        Ok(1)
    }
}

#[tokio::test]
async fn test_unique_author_count_judges_emptiness_from_one_read() {
    let service = PostService::new(
        Arc::new(LaggingCountMap),
        Arc::new(SteppingClock {
            start: Utc::now(),
            ticks: AtomicU64::new(0),
        }),
        Arc::new(SequentialIds(AtomicU64::new(1))),
        ServiceConfig::default(),
    );

    assert!(matches!(
        service.unique_author_count().await.unwrap_err(),
        DomainError::NoResults(_)
    ));
}
