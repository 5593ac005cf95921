use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use crate::api::{build_http_client, BackendCheckout, PaymentProvider, StripeClient};
use crate::config;
use crate::models::{ApiState, AppState};
use crate::services::BillingStore;

const OUTBOUND_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid host/port format: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Site state from the environment (call `config::load_env_file` first).
pub fn site_state_from_env(custom_css: Option<String>) -> Result<AppState, ServerError> {
    let client = build_http_client(OUTBOUND_TIMEOUT_SECS)?;
    let api_url = config::get_api_url();
    let public_base_url = config::get_public_base_url();
    let checkout = BackendCheckout::new(client.clone(), &api_url, &public_base_url);
    Ok(AppState {
        api_url,
        public_base_url,
        client,
        checkout: Arc::new(checkout),
        custom_css,
    })
}

/// Billing backend state from the environment. Without a secret key the
/// provider stays unset and paid endpoints answer 500.
pub fn api_state_from_env() -> Result<ApiState, ServerError> {
    let secret_key = config::get_stripe_secret_key();
    let provider: Option<Arc<dyn PaymentProvider>> = if secret_key.is_empty() {
        tracing::warn!("STRIPE_SECRET_KEY is not set; checkout endpoints are disabled");
        None
    } else {
        let client = build_http_client(OUTBOUND_TIMEOUT_SECS)?;
        Some(Arc::new(StripeClient::new(
            client,
            &config::get_stripe_api_base(),
            &secret_key,
        )))
    };
    Ok(ApiState {
        store: BillingStore::new(),
        provider,
        webhook_secret: config::get_stripe_webhook_secret(),
        public_base_url: config::get_public_base_url(),
    })
}

pub async fn serve(app: Router, host: &str, port: u16) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
