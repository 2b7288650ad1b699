//! Durable mapping stores.
//!
//! [`InMemoryRepository`] keeps mappings in a concurrent map and is meant for
//! single-process deployments and tests. [`MySqlRepository`] stores them in
//! the `urls` table, see `ddl/mysql/urls.sql`.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use shortly_core::repository::Result;
pub use shortly_core::{Mapping, Repository, StorageError};
