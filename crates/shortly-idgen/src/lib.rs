//! Identifier sources for short-code generation.
//!
//! Every implementation hands out strictly increasing `u64`s. Which one a
//! deployment uses is decided once at startup:
//!
//! - [`RedisIdSource`] shares an `INCR` counter across all instances.
//! - [`MySqlIdSource`] draws from an `AUTO_INCREMENT` ticket table.
//! - [`InMemoryIdSource`] is a process-local atomic, for single-instance
//!   deployments and tests.

pub mod memory;
pub mod mysql;
pub mod redis;

pub use memory::InMemoryIdSource;
pub use mysql::MySqlIdSource;
pub use self::redis::{RedisIdSource, RedisIdSourceConfig};
pub use shortly_core::{IdError, IdSource};
