use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use shortly_core::Mapping;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
    /// Unix seconds after which the mapping counts as expired.
    #[serde(default)]
    pub expiration_time: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub original_url: String,
    pub short_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CreateUrlResponse {
    pub fn from_mapping(mapping: Mapping, base_url: &str) -> Self {
        Self {
            short_url: mapping.short_code.to_url(base_url),
            original_url: mapping.original_url,
            created_at: mapping.created_at,
            updated_at: mapping.updated_at,
        }
    }
}
