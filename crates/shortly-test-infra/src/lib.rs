//! Disposable containers for integration tests.
//!
//! Each fixture owns its container; dropping the fixture stops it. Tests
//! using these fixtures need a reachable Docker daemon.

pub mod error;
pub mod mysql;
pub mod redis;

pub use error::{Result, TestInfraError};
