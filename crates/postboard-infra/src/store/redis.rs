//! Redis post map - persists every post as JSON in a single hash.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use postboard_core::domain::Post;
use postboard_core::error::RepoError;
use postboard_core::ports::PostMap;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Hash key holding the id -> post table
    pub posts_key: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            posts_key: "postboard:posts".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            posts_key: std::env::var("REDIS_POSTS_KEY")
                .unwrap_or_else(|_| "postboard:posts".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Redis-backed post map.
///
/// Posts live in one hash, field = post id, value = JSON record. Listings are
/// collected into a sorted map so they iterate in the same order as the
/// in-memory map.
pub struct RedisPostMap {
    conn: ConnectionManager,
    config: RedisConfig,
}

impl RedisPostMap {
    pub async fn new(config: RedisConfig) -> Result<Self, RepoError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| RepoError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| RepoError::Connection("Connection timed out".to_string()))?
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, key = %config.posts_key, "Connected to Redis post store");

        Ok(Self { conn, config })
    }

    fn decode(raw: &str) -> Result<Post, RepoError> {
        serde_json::from_str(raw).map_err(|e| RepoError::Serialization(e.to_string()))
    }

    async fn entries(&self) -> Result<Vec<(String, Post)>, RepoError> {
        let mut conn = self.conn.clone();
        let raw: BTreeMap<String, String> = conn
            .hgetall(&self.config.posts_key)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        raw.into_iter()
            .map(|(id, json)| Ok((id, Self::decode(&json)?)))
            .collect()
    }
}

#[async_trait]
impl PostMap for RedisPostMap {
    async fn get(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .hget(&self.config.posts_key, id)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        raw.as_deref().map(Self::decode).transpose()
    }

    async fn insert(&self, post: Post) -> Result<Option<Post>, RepoError> {
        let json =
            serde_json::to_string(&post).map_err(|e| RepoError::Serialization(e.to_string()))?;

        let previous = self.get(&post.id).await?;
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(&self.config.posts_key, &post.id, json)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(previous)
    }

    async fn remove(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let previous = self.get(id).await?;
        if previous.is_some() {
            let mut conn = self.conn.clone();
            conn.hdel::<_, _, ()>(&self.config.posts_key, id)
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
        }
        Ok(previous)
    }

    async fn values(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.entries().await?.into_iter().map(|(_, post)| post).collect())
    }

    async fn items(&self) -> Result<Vec<(String, Post)>, RepoError> {
        self.entries().await
    }

    async fn len(&self) -> Result<usize, RepoError> {
        let mut conn = self.conn.clone();
        conn.hlen(&self.config.posts_key)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}
