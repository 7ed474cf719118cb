use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::oauth::github::errors::GitHubAuthError;

/// Request-level failure of either OAuth handler. Every variant maps to a
/// plain-text HTTP response; nothing is retried or swallowed.
#[derive(Debug)]
pub enum FlowError {
    /// A required environment variable was not set. The message names it.
    MissingConfig(&'static str),
    MissingCode,
    InvalidState,
    OAuth(GitHubAuthError),
    Internal(String),
}

impl FlowError {
    fn status(&self) -> StatusCode {
        use FlowError::*;
        match self {
            MissingConfig(_) | Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MissingCode | InvalidState => StatusCode::BAD_REQUEST,
            OAuth(GitHubAuthError::Rejected { .. }) => StatusCode::BAD_REQUEST,
            OAuth(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FlowError::*;
        match self {
            MissingConfig(msg) => write!(f, "{}", msg),
            MissingCode => write!(f, "Missing code"),
            InvalidState => write!(f, "Invalid state"),
            OAuth(err) => write!(f, "{}", err),
            Internal(msg) if msg.is_empty() => write!(f, "Unknown error"),
            Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl IntoResponse for FlowError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
