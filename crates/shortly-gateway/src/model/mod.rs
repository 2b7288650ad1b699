mod url;

use serde::{Deserialize, Serialize};

pub use url::{CreateUrlRequest, CreateUrlResponse};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
