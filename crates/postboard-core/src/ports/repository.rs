use async_trait::async_trait;

use crate::domain::Post;
use crate::error::RepoError;

/// Ordered key-value map holding every post, keyed by post id.
///
/// Writes are whole-record overwrites; there is no partial update.
/// Listing methods return entries in the map's iteration order.
#[async_trait]
pub trait PostMap: Send + Sync {
    /// Look up a post by id.
    async fn get(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Insert or overwrite a post under its own id. Returns the previous record.
    async fn insert(&self, post: Post) -> Result<Option<Post>, RepoError>;

    /// Remove a post. Returns the removed record.
    async fn remove(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// All stored posts.
    async fn values(&self) -> Result<Vec<Post>, RepoError>;

    /// All stored `(id, post)` pairs.
    async fn items(&self) -> Result<Vec<(String, Post)>, RepoError>;

    /// Number of stored posts.
    async fn len(&self) -> Result<usize, RepoError>;
}
