use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jiff::Timestamp;
use shortly_shortener::ShortenParams;
use tracing::info;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;

    let expiration_time = request
        .expiration_time
        .map(|secs| Timestamp::from_second(secs).map_err(|_| AppError::InvalidExpiration(secs)))
        .transpose()?;

    let mapping = state
        .shortener()
        .create(ShortenParams {
            original_url: request.url,
            expiration_time,
        })
        .await?;

    info!(code = %mapping.short_code, "short url created");
    let response = CreateUrlResponse::from_mapping(mapping, state.base_url());
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Response> {
    redirect(&state, &short_code).await
}

/// Redirect for codes that collide with a fixed route, such as `GET /short`.
pub async fn reserved_path_redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response> {
    redirect(&state, uri.path().trim_start_matches('/')).await
}

async fn redirect(state: &AppState, short_code: &str) -> Result<Response> {
    let url = state.shortener().resolve(short_code).await?;
    let location = HeaderValue::try_from(escape_location(&url))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Bytes kept as-is in a redirect target besides ASCII alphanumerics.
const LOCATION_SAFE: &[u8] = b"-._~:/%#?=@[]!$&'()*+,;";

/// Percent-encodes every byte that may not appear verbatim in a `Location`
/// header. Existing escapes are left alone.
fn escape_location(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for &byte in url.as_bytes() {
        if byte.is_ascii_alphanumeric() || LOCATION_SAFE.contains(&byte) {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}
