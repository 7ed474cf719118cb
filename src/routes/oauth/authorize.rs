use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use rand_core::{OsRng, RngCore};

use crate::error::FlowError;
use crate::state::AppState;

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const OAUTH_SCOPE: &str = "repo,user";
pub const STATE_COOKIE: &str = "oauth_state";

/// Redirects the browser to GitHub's consent screen, with the CSRF state
/// token carried both in the URL and in a short-lived cookie.
pub async fn authorize(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<impl IntoResponse, FlowError> {
    let client_id = state
        .config
        .github_client_id
        .as_deref()
        .ok_or(FlowError::MissingConfig("GITHUB_CLIENT_ID is not set"))?;

    let redirect_uri = match &state.config.oauth_redirect {
        Some(uri) => uri.clone(),
        None => format!("{}/api/callback", request_origin(&headers)?),
    };

    let csrf_token = generate_state_token();

    let auth_url = format!(
        "{}?client_id={}&redirect_uri={}&scope={}&state={}",
        GITHUB_AUTHORIZE_URL,
        urlencoding::encode(client_id),
        urlencoding::encode(&redirect_uri),
        urlencoding::encode(OAUTH_SCOPE),
        urlencoding::encode(&csrf_token),
    );

    let state_cookie = Cookie::build((STATE_COOKIE, csrf_token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(600))
        .build();

    Ok((
        jar.add(state_cookie),
        (StatusCode::FOUND, [(header::LOCATION, auth_url)]),
    ))
}

/// Origin of the inbound request, honoring the forwarding headers set by a
/// reverse proxy. Falls back to `https://` + the Host header.
fn request_origin(headers: &HeaderMap) -> Result<String, FlowError> {
    if let (Some(proto), Some(host)) = (
        header_str(headers, "x-forwarded-proto"),
        header_str(headers, "x-forwarded-host"),
    ) {
        return Ok(format!("{}://{}", proto, host));
    }
    let host = header_str(headers, "host")
        .ok_or_else(|| FlowError::Internal("Missing host header".to_string()))?;
    Ok(format!("https://{}", host))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn generate_state_token() -> String {
    let mut csrf_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut csrf_bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(csrf_bytes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt; // for `.oneshot()`

    use super::authorize;
    use crate::config::Config;
    use crate::services::oauth::github::mock_github_oauth::MockGitHubOAuth;
    use crate::state::AppState;

    fn test_config() -> Config {
        Config {
            github_client_id: Some("test-client".into()),
            github_client_secret: Some("test-secret".into()),
            oauth_redirect: None,
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }

    fn app(config: Config) -> Router {
        let state = AppState {
            github_oauth: Arc::new(MockGitHubOAuth::default()),
            config: Arc::new(config),
        };
        Router::new().route("/api/auth", get(authorize)).with_state(state)
    }

    fn query_params(url: &str) -> HashMap<String, String> {
        url.split_once('?')
            .map(|(_, query)| query)
            .unwrap_or("")
            .split('&')
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=')?;
                Some((
                    urlencoding::decode(k).ok()?.into_owned(),
                    urlencoding::decode(v).ok()?.into_owned(),
                ))
            })
            .collect()
    }

    #[tokio::test]
    async fn redirects_to_github_with_state_cookie() {
        let response = app(test_config())
            .oneshot(
                Request::get("/api/auth")
                    .header("host", "cms.example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);

        let location = response
            .headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(location.starts_with("https://github.com/login/oauth/authorize?"));

        let params = query_params(location);
        assert_eq!(params.get("client_id").map(String::as_str), Some("test-client"));
        assert_eq!(
            params.get("redirect_uri").map(String::as_str),
            Some("https://cms.example.org/api/callback")
        );
        assert_eq!(params.get("scope").map(String::as_str), Some("repo,user"));
        let state = params.get("state").unwrap();
        assert!(!state.is_empty());

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with(&format!("oauth_state={}", state)));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=600"));
    }

    #[tokio::test]
    async fn honors_forwarding_headers() {
        let response = app(test_config())
            .oneshot(
                Request::get("/api/auth")
                    .header("host", "internal:8080")
                    .header("x-forwarded-proto", "http")
                    .header("x-forwarded-host", "cms.example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let location = response
            .headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap();
        let params = query_params(location);
        assert_eq!(
            params.get("redirect_uri").map(String::as_str),
            Some("http://cms.example.org/api/callback")
        );
    }

    #[tokio::test]
    async fn honors_redirect_override() {
        let config = Config {
            oauth_redirect: Some("https://auth.example.net/api/callback".into()),
            ..test_config()
        };

        let response = app(config)
            .oneshot(
                Request::get("/api/auth")
                    .header("host", "ignored.example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let location = response
            .headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap();
        let params = query_params(location);
        assert_eq!(
            params.get("redirect_uri").map(String::as_str),
            Some("https://auth.example.net/api/callback")
        );
    }

    #[tokio::test]
    async fn missing_client_id_is_server_error_not_redirect() {
        let config = Config {
            github_client_id: None,
            ..test_config()
        };

        let response = app(config)
            .oneshot(
                Request::get("/api/auth")
                    .header("host", "cms.example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get("location").is_none());

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("GITHUB_CLIENT_ID"));
    }

    #[tokio::test]
    async fn state_tokens_are_unique_per_request() {
        let token_a = super::generate_state_token();
        let token_b = super::generate_state_token();
        assert_ne!(token_a, token_b);
        // 32 random bytes, URL-safe base64 without padding
        assert_eq!(token_a.len(), 43);
    }
}
