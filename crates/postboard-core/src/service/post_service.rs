//! The post store: every operation on posts, comments and reactions.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    Comment, Post, PostPayload, Principal, Reaction, Statistics, most_disliked, most_liked,
    unique_authors,
};
use crate::error::DomainError;
use crate::ports::{Clock, IdGenerator, PostMap};

/// Post store behavior switches.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Report an empty author/search result as `NoResults` instead of an empty list.
    pub empty_results_as_error: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            empty_results_as_error: true,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            empty_results_as_error: std::env::var("POSTS_EMPTY_RESULTS_AS_ERROR")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}

/// Post store over an injected map, clock and id source.
///
/// Mutations are read-modify-write cycles on a single record. They run one at
/// a time behind `writes`, so two updates to the same post apply in call order.
pub struct PostService {
    posts: Arc<dyn PostMap>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    config: ServiceConfig,
    writes: Mutex<()>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostMap>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            posts,
            clock,
            ids,
            config,
            writes: Mutex::new(()),
        }
    }

    pub async fn count_posts(&self) -> Result<usize, DomainError> {
        Ok(self.posts.len().await?)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.values().await?)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        tracing::debug!(post_id = %id, "Fetching post");
        self.posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create_post(
        &self,
        payload: PostPayload,
        caller: &Principal,
    ) -> Result<Post, DomainError> {
        let _guard = self.writes.lock().await;

        let post = Post::new(self.ids.generate(), caller.clone(), payload, self.clock.now());
        self.posts.insert(post.clone()).await?;

        tracing::info!(post_id = %post.id, caller = %caller, "Post created");
        Ok(post)
    }

    /// Only the author may update. A rejected call leaves the record untouched.
    pub async fn update_post(
        &self,
        id: &str,
        payload: PostPayload,
        caller: &Principal,
    ) -> Result<Post, DomainError> {
        let _guard = self.writes.lock().await;

        let mut post = self.get_post(id).await?;
        if !post.is_authored_by(caller) {
            tracing::warn!(post_id = %id, caller = %caller, "Rejected update by non-author");
            return Err(DomainError::Unauthorized(
                "only post authors can update a post".to_string(),
            ));
        }

        post.apply(payload, self.clock.now());
        self.posts.insert(post.clone()).await?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    /// Only the author may delete. Authorship is checked before anything is removed.
    pub async fn delete_post(&self, id: &str, caller: &Principal) -> Result<Post, DomainError> {
        let _guard = self.writes.lock().await;

        let post = self.get_post(id).await?;
        if !post.is_authored_by(caller) {
            tracing::warn!(post_id = %id, caller = %caller, "Rejected delete by non-author");
            return Err(DomainError::Unauthorized(
                "only post authors can delete a post".to_string(),
            ));
        }

        let removed = self
            .posts
            .remove(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(removed)
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        content: String,
        caller: &Principal,
    ) -> Result<Comment, DomainError> {
        let _guard = self.writes.lock().await;

        let mut post = self.get_post(post_id).await?;
        let comment = post.add_comment(caller.clone(), content, self.clock.now());
        self.posts.insert(post).await?;

        tracing::info!(post_id = %post_id, caller = %caller, "Comment added");
        Ok(comment)
    }

    /// Returns the post's like count after the change.
    pub async fn like_post(&self, post_id: &str, caller: &Principal) -> Result<u64, DomainError> {
        self.react(post_id, caller, "like", Post::like).await
    }

    /// Returns the post's like count after the change.
    pub async fn unlike_post(&self, post_id: &str, caller: &Principal) -> Result<u64, DomainError> {
        self.react(post_id, caller, "unlike", Post::unlike).await
    }

    /// Returns the post's dislike count after the change.
    pub async fn dislike_post(
        &self,
        post_id: &str,
        caller: &Principal,
    ) -> Result<u64, DomainError> {
        self.react(post_id, caller, "dislike", Post::dislike).await
    }

    /// Returns the post's dislike count after the change.
    pub async fn undislike_post(
        &self,
        post_id: &str,
        caller: &Principal,
    ) -> Result<u64, DomainError> {
        self.react(post_id, caller, "undislike", Post::undislike).await
    }

    pub async fn reaction_of(
        &self,
        post_id: &str,
        caller: &Principal,
    ) -> Result<Option<Reaction>, DomainError> {
        Ok(self.get_post(post_id).await?.reaction_of(caller))
    }

    async fn react<F>(
        &self,
        post_id: &str,
        caller: &Principal,
        action: &'static str,
        transition: F,
    ) -> Result<u64, DomainError>
    where
        F: FnOnce(&mut Post, &Principal) -> Result<u64, DomainError>,
    {
        let _guard = self.writes.lock().await;

        let mut post = self.get_post(post_id).await?;
        let count = transition(&mut post, caller).inspect_err(|e| {
            tracing::warn!(
                post_id = %post_id,
                caller = %caller,
                action,
                error = %e,
                "Reaction rejected"
            );
        })?;
        self.posts.insert(post).await?;

        tracing::info!(post_id = %post_id, caller = %caller, action, count, "Reaction recorded");
        Ok(count)
    }

    pub async fn get_posts_by_author(&self, author: &Principal) -> Result<Vec<Post>, DomainError> {
        let posts = self
            .posts
            .values()
            .await?
            .into_iter()
            .filter(|post| post.is_authored_by(author))
            .collect();

        self.non_empty(posts, "No posts by the user found")
    }

    /// Linear scan; an empty term matches every post.
    pub async fn search_posts(&self, term: &str) -> Result<Vec<Post>, DomainError> {
        let posts = self
            .posts
            .items()
            .await?
            .into_iter()
            .filter_map(|(_, post)| post.matches(term).then_some(post))
            .collect();

        self.non_empty(posts, "No posts with the specified term")
    }

    pub async fn compute_statistics(&self) -> Result<Statistics, DomainError> {
        let posts = self.posts.values().await?;
        Statistics::compute(&posts).ok_or_else(no_posts)
    }

    pub async fn most_liked_post(&self) -> Result<Post, DomainError> {
        let posts = self.posts.values().await?;
        most_liked(&posts).cloned().ok_or_else(no_posts)
    }

    pub async fn most_disliked_post(&self) -> Result<Post, DomainError> {
        let posts = self.posts.values().await?;
        most_disliked(&posts).cloned().ok_or_else(no_posts)
    }

    pub async fn unique_author_count(&self) -> Result<usize, DomainError> {
        let posts = self.posts.values().await?;
        if posts.is_empty() {
            return Err(no_posts());
        }
        Ok(unique_authors(&posts))
    }

    fn non_empty(&self, posts: Vec<Post>, message: &str) -> Result<Vec<Post>, DomainError> {
        if posts.is_empty() && self.config.empty_results_as_error {
            return Err(DomainError::NoResults(message.to_string()));
        }
        Ok(posts)
    }
}

fn no_posts() -> DomainError {
    DomainError::NoResults("No posts stored".to_string())
}
