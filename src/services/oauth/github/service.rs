// services/oauth/github/service.rs

use super::{errors::GitHubAuthError, models::GitHubToken};
use async_trait::async_trait;

/// Token exchange against GitHub's OAuth endpoint. Credentials are passed per
/// call so presence checks stay with the handler that owns the HTTP response.
#[async_trait]
pub trait GitHubOAuthService: Send + Sync {
    async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<GitHubToken, GitHubAuthError>;
}
