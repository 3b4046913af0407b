//! In-memory post map - the default store, and the fallback when Redis is unavailable.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::domain::Post;
use postboard_core::error::RepoError;
use postboard_core::ports::PostMap;

/// Post map backed by a `BTreeMap` with an async RwLock. Iterates in id order.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostMap {
    store: RwLock<BTreeMap<String, Post>>,
}

impl InMemoryPostMap {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryPostMap {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostMap for InMemoryPostMap {
    async fn get(&self, id: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.insert(post.id.clone(), post))
    }

    async fn remove(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.remove(id))
    }

    async fn values(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.read().await.values().cloned().collect())
    }

    async fn items(&self) -> Result<Vec<(String, Post)>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .map(|(id, post)| (id.clone(), post.clone()))
            .collect())
    }

    async fn len(&self) -> Result<usize, RepoError> {
        Ok(self.store.read().await.len())
    }
}
