//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `auth` - JWT bearer token validation
//! - `redis` - Redis-persisted post map

pub mod clock;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use clock::{SystemClock, UuidGenerator};
pub use store::InMemoryPostMap;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use store::{RedisConfig, RedisPostMap};
