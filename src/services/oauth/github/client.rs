// services/oauth/github/client.rs

use async_trait::async_trait;
use reqwest::Client;

use super::errors::GitHubAuthError;
use super::models::{GitHubToken, TokenEndpointResponse};
use super::service::GitHubOAuthService;

pub const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

#[derive(Clone)]
pub struct GitHubOAuthClient {
    pub client: Client,
    /// Token endpoint, overridable so tests can point at a local mock server.
    pub token_url: String,
}

impl GitHubOAuthClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            token_url: GITHUB_TOKEN_URL.to_string(),
        }
    }
}

#[async_trait]
impl GitHubOAuthService for GitHubOAuthClient {
    async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<GitHubToken, GitHubAuthError> {
        let res = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json") // Needed to get JSON instead of URL-encoded
            .json(&serde_json::json!({
                "client_id": client_id,
                "client_secret": client_secret,
                "code": code,
            }))
            .send()
            .await
            .map_err(|e| GitHubAuthError::ExchangeFailed(e.to_string()))?;

        let payload: TokenEndpointResponse = res
            .json()
            .await
            .map_err(|_| GitHubAuthError::InvalidTokenJson)?;

        if let Some(error) = payload.error {
            return Err(GitHubAuthError::Rejected {
                error,
                error_description: payload.error_description,
            });
        }

        let access_token = payload
            .access_token
            .ok_or(GitHubAuthError::InvalidTokenJson)?;
        Ok(GitHubToken { access_token })
    }
}
