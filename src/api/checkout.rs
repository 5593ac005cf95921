use async_trait::async_trait;
use serde_json::json;

use crate::error::CheckoutError;
use crate::models::CheckoutSession;
use crate::utils::absolute_url;

use super::client::error_message_from_text;

pub const CHECKOUT_SESSION_PATH: &str = "/api/v1/billing/create-checkout-session";

/// Hands a plan purchase off to a hosted checkout page.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn redirect_to_checkout(
        &self,
        plan_id: &str,
        user_id: &str,
    ) -> Result<CheckoutSession, CheckoutError>;
}

/// Opens checkout sessions through the billing backend at `API_URL`.
pub struct BackendCheckout {
    client: reqwest::Client,
    api_url: String,
    public_base_url: String,
}

impl BackendCheckout {
    pub fn new(client: reqwest::Client, api_url: &str, public_base_url: &str) -> Self {
        BackendCheckout {
            client,
            api_url: api_url.to_string(),
            public_base_url: public_base_url.to_string(),
        }
    }
}

#[async_trait]
impl CheckoutGateway for BackendCheckout {
    async fn redirect_to_checkout(
        &self,
        plan_id: &str,
        user_id: &str,
    ) -> Result<CheckoutSession, CheckoutError> {
        let url = format!("{}{}", self.api_url, CHECKOUT_SESSION_PATH);
        let body = json!({
            "plan": plan_id,
            "user_id": user_id,
            "success_url": absolute_url(&self.public_base_url, "/dashboard?success=true"),
            "cancel_url": absolute_url(&self.public_base_url, "/pricing?canceled=true"),
        });
        tracing::debug!(%url, plan_id, user_id, "Requesting checkout session");

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CheckoutError::Unavailable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let detail = error_message_from_text(&text)
                .unwrap_or_else(|| format!("backend returned {}", status));
            return Err(CheckoutError::Rejected(detail));
        }
        resp.json::<CheckoutSession>()
            .await
            .map_err(|e| CheckoutError::Unavailable(format!("unexpected response: {}", e)))
    }
}
