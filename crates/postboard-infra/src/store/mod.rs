//! Post map implementations - Redis and in-memory.

mod memory;

pub use memory::InMemoryPostMap;

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisPostMap};
