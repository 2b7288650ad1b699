//! Shortening and resolution orchestration.
//!
//! [`ShortenerService`] wires an identifier source, a cache and a mapping
//! store together. Backends are picked by the caller; see `shortly-idgen`,
//! `shortly-cache` and `shortly-storage` for the stock implementations.

pub mod error;
pub mod service;
pub mod shortener;

pub use error::{Result, ShortenerError};
pub use service::ShortenerService;
pub use shortener::{ShortenParams, Shortener};
