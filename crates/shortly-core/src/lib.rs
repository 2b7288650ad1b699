//! Core types and traits for the Shortly URL shortener.
//!
//! This crate holds the pieces every other crate agrees on: the
//! [`ShortCode`] and [`Mapping`] types, the base62 codec, the URL validator,
//! and the capability traits for the identifier source, the cache and the
//! mapping store.

pub mod base62;
pub mod cache;
pub mod error;
pub mod id;
pub mod mapping;
pub mod repository;
pub mod shortcode;
pub mod validator;

pub use cache::UrlCache;
pub use error::{CacheError, CoreError, IdError, StorageError};
pub use id::IdSource;
pub use mapping::{Mapping, MappingState};
pub use repository::Repository;
pub use shortcode::ShortCode;
