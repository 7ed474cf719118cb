use async_trait::async_trait;

use crate::services::oauth::github::{
    errors::GitHubAuthError, models::GitHubToken, service::GitHubOAuthService,
};

/// Test double for the token exchange: returns a fixed token, or a fixed
/// error when one is configured.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockGitHubOAuth {
    pub token: GitHubToken,
    pub failure: Option<GitHubAuthError>,
}

#[async_trait]
impl GitHubOAuthService for MockGitHubOAuth {
    async fn exchange_code(
        &self,
        _client_id: &str,
        _client_secret: &str,
        _code: &str,
    ) -> Result<GitHubToken, GitHubAuthError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.token.clone()),
        }
    }
}
