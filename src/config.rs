use std::env;

/// Process configuration, read once at startup. The OAuth credentials stay
/// optional here so a missing variable surfaces as an HTTP 500 on the request
/// that needs it rather than preventing the gateway from starting.
pub struct Config {
    pub github_client_id: Option<String>,
    pub github_client_secret: Option<String>,
    /// Explicit callback URL override. When unset the callback URL is derived
    /// from the request's own host (or forwarding headers).
    pub oauth_redirect: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok(); // Load .env file

        Config {
            github_client_id: non_empty_var("GITHUB_CLIENT_ID"),
            github_client_secret: non_empty_var("GITHUB_CLIENT_SECRET"),
            oauth_redirect: non_empty_var("OAUTH_REDIRECT"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(3000),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
