//! End-to-end tests for The Grasshopper storefront API.
//!
//! Each test starts the real router on an ephemeral port with every
//! upstream (Square, Anthropic, Netlify) pointed at one `wiremock` server,
//! then talks to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p grasshopper-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::time::Duration;

use grasshopper_core::Email;
use grasshopper_storefront::config::{
    AnthropicConfig, LogFormat, NetlifyConfig, SquareConfig, StorefrontConfig,
};
use grasshopper_storefront::db::ReviewStore;
use grasshopper_storefront::state::AppState;
use secrecy::SecretString;
use wiremock::MockServer;

/// Admin key configured for every test server.
pub const ADMIN_KEY: &str = "k3Y-9fQ2-zX7w-Lm4P";

/// Configuration with every integration pointed at `upstream`.
#[must_use]
pub fn config_for(upstream: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid loopback address"),
        port: 0,
        site_origin: "https://shopgrasshopper.com".to_string(),
        database_url: None,
        square: SquareConfig {
            access_token: SecretString::from("sq-integration-token"),
            application_id: "sq0idp-integration".to_string(),
            base_url: format!("{upstream}/v2"),
            api_version: "2024-01-18".to_string(),
            discount_api_version: "2024-11-20".to_string(),
        },
        owner_email: Email::parse("owner@shopgrasshopper.com").expect("valid owner e-mail"),
        http_timeout: Duration::from_secs(5),
        anthropic: Some(AnthropicConfig {
            api_key: SecretString::from("sk-ant-integration"),
            model: "claude-sonnet-4-5-20250929".to_string(),
            api_url: format!("{upstream}/v1/messages"),
        }),
        gmail: None,
        netlify: Some(NetlifyConfig {
            api_token: SecretString::from("nf-integration"),
            site_id: "site-123".to_string(),
            api_url: format!("{upstream}/api/v1"),
        }),
        admin_key: Some(SecretString::from(ADMIN_KEY)),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
        log_format: LogFormat::Pretty,
    }
}

/// A running storefront plus its mocked upstream.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub upstream: MockServer,
}

impl TestContext {
    /// Start a storefront against a fresh mock upstream.
    pub async fn start() -> Self {
        let upstream = MockServer::start().await;
        let state = AppState::new(config_for(&upstream.uri()), ReviewStore::in_memory())
            .expect("Failed to build application state");
        let app = grasshopper_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has an address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server error");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            upstream,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
