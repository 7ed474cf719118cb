use crate::config::Config;
use crate::services::oauth::github::service::GitHubOAuthService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub github_oauth: Arc<dyn GitHubOAuthService>,
    pub config: Arc<Config>,
}
