//! Cache implementations for short-code resolution.
//!
//! Every cache applies one fixed TTL to all of its entries. The
//! orchestrator treats any [`CacheError`] as a miss, so these
//! implementations report backend trouble instead of hiding it.

pub mod layered;
pub mod moka;
pub mod noop;
pub mod redis;

pub use layered::LayeredCache;
pub use self::moka::{MokaCacheConfig, MokaUrlCache};
pub use noop::NoopUrlCache;
pub use self::redis::{RedisCacheConfig, RedisUrlCache};
pub use shortly_core::cache::Result;
pub use shortly_core::{CacheError, UrlCache};
