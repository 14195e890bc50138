use std::time::Duration;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use percent_encoding::percent_decode_str;

use super::error::ApiError;
use super::server::AppState;

/// Decoded query pairs in request order; repeated keys are kept.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// PUT /<queue>?v=<value> - Offer a value (returns before delivery)
pub async fn handle_put(
    State(state): State<AppState>,
    uri: Uri,
    query: QueryPairs,
) -> Result<StatusCode, ApiError> {
    let params = query_pairs(query)?;
    let value = match first_value(&params, "v") {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => return Err(ApiError::MissingValue),
    };

    let queue = state.registry.get_or_create(&queue_name(&uri)?);
    let pending = queue.offer(value);
    let send_ttl = state.send_ttl;

    tokio::spawn(async move {
        pending.delivered(send_ttl).await;
    });

    Ok(StatusCode::OK)
}

/// GET /<queue>[?timeout=<seconds>] - Claim the next value (poll or wait)
pub async fn handle_get(
    State(state): State<AppState>,
    uri: Uri,
    query: QueryPairs,
) -> Result<String, ApiError> {
    let params = query_pairs(query)?;
    let timeout = parse_timeout(first_value(&params, "timeout"))?;

    let queue_name = queue_name(&uri)?;
    let queue = state
        .registry
        .lookup(&queue_name)
        .ok_or(ApiError::QueueNotFound(queue_name))?;

    let message = queue.receive(timeout).await?;
    Ok(message.payload)
}

/// HEAD /<queue> - Not supported; reading has the side effect of claiming
pub async fn reject_head() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, PUT")])
}

/// The percent-decoded request path, leading slash included.
pub fn queue_name(uri: &Uri) -> Result<String, ApiError> {
    percent_decode_str(uri.path())
        .decode_utf8()
        .map(|name| name.into_owned())
        .map_err(|_| ApiError::InvalidQueueName)
}

fn query_pairs(query: QueryPairs) -> Result<Vec<(String, String)>, ApiError> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|rejection| ApiError::MalformedQuery(rejection.body_text()))
}

/// Later repeats of a key are ignored.
fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// An absent or empty `timeout` means poll.
pub fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ApiError::InvalidTimeout(raw.to_string())),
    }
}
