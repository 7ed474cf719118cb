// services/oauth/github/errors.rs
use std::fmt;

#[derive(Debug, Clone)]
pub enum GitHubAuthError {
    /// Transport-level failure reaching the token endpoint.
    ExchangeFailed(String),
    /// The token endpoint answered with something that is not the expected
    /// JSON payload, or a success payload without an access token.
    InvalidTokenJson,
    /// The token endpoint returned an OAuth error payload.
    Rejected {
        error: String,
        error_description: Option<String>,
    },
}

impl fmt::Display for GitHubAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GitHubAuthError::*;
        match self {
            ExchangeFailed(msg) => write!(f, "GitHub token exchange failed: {}", msg),
            InvalidTokenJson => write!(f, "Invalid token response from GitHub"),
            Rejected {
                error,
                error_description,
            } => write!(
                f,
                "OAuth error: {}",
                error_description.as_deref().unwrap_or(error)
            ),
        }
    }
}
