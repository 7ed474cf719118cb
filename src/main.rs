mod config;
mod error;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use routes::oauth::{authorize, callback};
use services::oauth::github::client::GitHubOAuthClient;
use state::AppState;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let config = Arc::new(Config::from_env());
    if config.github_client_id.is_none() || config.github_client_secret.is_none() {
        // Not fatal: requests answer 500 until the variables are set
        warn!("GITHUB_CLIENT_ID/GITHUB_CLIENT_SECRET are not configured");
    }

    let state = AppState {
        github_oauth: Arc::new(GitHubOAuthClient::new(Client::new())),
        config: config.clone(),
    };

    let app = Router::new()
        .route("/api/auth", get(authorize))
        .route("/api/callback", get(callback))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid HOST/PORT configuration");
    let listener = TcpListener::bind(addr).await.unwrap();
    info!("OAuth gateway listening on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
