use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::queue::RecvError;

/// Request-level failures, each mapped to exactly one status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or empty value parameter `v`")]
    MissingValue,

    #[error("malformed query string: {0}")]
    MalformedQuery(String),

    #[error("queue name is not valid UTF-8 once decoded")]
    InvalidQueueName,

    #[error("invalid timeout `{0}`: expected a non-negative number of seconds")]
    InvalidTimeout(String),

    #[error("queue `{0}` does not exist")]
    QueueNotFound(String),

    #[error(transparent)]
    NoMessage(#[from] RecvError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingValue
            | ApiError::MalformedQuery(_)
            | ApiError::InvalidQueueName
            | ApiError::InvalidTimeout(_) => StatusCode::BAD_REQUEST,
            ApiError::QueueNotFound(_) | ApiError::NoMessage(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "request answered without a value");
        self.status().into_response()
    }
}

/// Failures that stop the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
