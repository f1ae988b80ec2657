//! Session cache backends.
//!
//! - [`RedisSessionCache`] - shared store, used when `REDIS_URL` is configured
//! - [`MemorySessionCache`] - in-process fallback when Redis is absent or unreachable

mod memory_session_cache;
mod redis_session_cache;

pub use memory_session_cache::MemorySessionCache;
pub use redis_session_cache::RedisSessionCache;
