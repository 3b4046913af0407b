//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::{PostMap, TokenService};
use postboard_core::{PostService, ServiceConfig};
use postboard_infra::{InMemoryPostMap, JwtTokenService, SystemClock, UuidGenerator};

#[cfg(feature = "redis")]
use postboard_infra::{RedisConfig, RedisPostMap};

use crate::config::{AppConfig, StoreBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state with the configured post map.
    pub async fn new(config: &AppConfig) -> Self {
        let map = build_post_map(config.store).await;
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());

        tracing::info!("Application state initialized");

        Self::with_parts(map, tokens, config.service.clone())
    }

    /// Assemble state from an existing map and token service.
    pub fn with_parts(
        map: Arc<dyn PostMap>,
        tokens: Arc<dyn TokenService>,
        service_config: ServiceConfig,
    ) -> Self {
        let posts = PostService::new(
            map,
            Arc::new(SystemClock),
            Arc::new(UuidGenerator),
            service_config,
        );

        Self {
            posts: Arc::new(posts),
            tokens,
        }
    }

    #[cfg(test)]
    pub fn in_memory(tokens: Arc<dyn TokenService>, service_config: ServiceConfig) -> Self {
        Self::with_parts(Arc::new(InMemoryPostMap::new()), tokens, service_config)
    }
}

async fn build_post_map(backend: StoreBackend) -> Arc<dyn PostMap> {
    match backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory post store");
            Arc::new(InMemoryPostMap::new())
        }
        #[cfg(feature = "redis")]
        StoreBackend::Redis => redis_or_memory(RedisConfig::from_env()).await,
        #[cfg(not(feature = "redis"))]
        StoreBackend::Redis => {
            tracing::warn!("Built without redis feature - using in-memory post store");
            Arc::new(InMemoryPostMap::new())
        }
    }
}

#[cfg(feature = "redis")]
async fn redis_or_memory(config: RedisConfig) -> Arc<dyn PostMap> {
    match RedisPostMap::new(config).await {
        Ok(map) => Arc::new(map),
        Err(e) => {
            tracing::error!(
                "Failed to connect to Redis: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryPostMap::new())
        }
    }
}
