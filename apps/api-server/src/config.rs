//! Application configuration loaded from environment variables.

use std::env;

use postboard_core::ServiceConfig;

/// Which post map backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "memory" | "in-memory" => Some(Self::Memory),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let store = match env::var("POST_STORE") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown POST_STORE, using in-memory store");
                StoreBackend::Memory
            }),
            Err(_) => StoreBackend::Memory,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            store,
            service: ServiceConfig::from_env(),
        }
    }
}
