use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse};

use crate::error::FlowError;
use crate::services::oauth::github::models::GitHubCallback;
use crate::state::AppState;
use crate::utils::cookies::parse_cookie_header;

use super::authorize::STATE_COOKIE;

/// Handles GitHub's redirect back: validates the CSRF state, exchanges the
/// code for an access token and returns the bridge page that relays the
/// token to the CMS window that opened the popup.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GitHubCallback>,
) -> Result<impl IntoResponse, FlowError> {
    let cookie_header = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    let cookies = parse_cookie_header(&cookie_header);

    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or(FlowError::MissingCode)?;

    // State is compared only when both the cookie and the parameter are
    // present; a missing side skips the check instead of blocking the flow.
    let expected_state = cookies
        .get(STATE_COOKIE)
        .map(String::as_str)
        .filter(|s| !s.is_empty());
    let received_state = params.state.as_deref().filter(|s| !s.is_empty());
    if let (Some(expected), Some(received)) = (expected_state, received_state) {
        if expected != received {
            return Err(FlowError::InvalidState);
        }
    }

    let (client_id, client_secret) = match (
        state.config.github_client_id.as_deref(),
        state.config.github_client_secret.as_deref(),
    ) {
        (Some(id), Some(secret)) => (id, secret),
        _ => {
            return Err(FlowError::MissingConfig(
                "GITHUB_CLIENT_ID/GITHUB_CLIENT_SECRET are not set",
            ))
        }
    };

    let token = state
        .github_oauth
        .exchange_code(client_id, client_secret, code)
        .await
        .map_err(|e| {
            tracing::error!("GitHub token exchange failed: {}", e);
            FlowError::OAuth(e)
        })?;

    Ok(Html(bridge_page(&token.access_token)))
}

/// HTML page delivered to the popup. Decap/Netlify CMS expects the provider
/// to postMessage `authorization:github:success:<token>` to the opener.
fn bridge_page(access_token: &str) -> String {
    // JSON string literal, so the token is safely embedded in the script
    let token_literal =
        serde_json::to_string(access_token).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>Authorizing&hellip;</title></head>
  <body>
    <script>
      (function () {{
        var token = {token_literal};
        var msg = 'authorization:github:success:' + token;
        if (window.opener) {{
          window.opener.postMessage(msg, '*');
          window.close();
        }} else {{
          document.body.innerText = 'Token: ' + token;
        }}
      }})();
    </script>
  </body>
</html>
"#
    )
}
