//! HTTP surface of the shortener.
//!
//! `POST /short` creates a mapping, `GET /{short_code}` redirects to it and
//! `GET /health` reports liveness.

pub mod app;
pub mod backends;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
