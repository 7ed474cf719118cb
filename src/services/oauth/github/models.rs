// services/oauth/github/models.rs
use serde::Deserialize;

/// Query parameters GitHub appends when redirecting back to the callback.
/// Both are optional at the type level; the handler decides what is missing.
#[derive(Debug, Deserialize)]
pub struct GitHubCallback {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GitHubToken {
    pub access_token: String,
}

/// Raw token-endpoint payload. GitHub answers 200 for both outcomes and
/// signals failure through the `error` field.
#[derive(Debug, Deserialize)]
pub struct TokenEndpointResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
