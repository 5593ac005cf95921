use std::sync::Arc;

use crate::api::CheckoutGateway;

/// State shared by the site server.
#[derive(Clone)]
pub struct AppState {
    /// Origin `/api/*` is forwarded to.
    pub api_url: String,
    pub public_base_url: String,
    pub client: reqwest::Client,
    pub checkout: Arc<dyn CheckoutGateway>,
    pub custom_css: Option<String>,
}
