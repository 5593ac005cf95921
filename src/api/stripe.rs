use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rand::RngCore;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::models::CheckoutSession;

use super::client::error_message_from_text;

/// Everything needed to open a subscription checkout for one plan.
#[derive(Clone, Debug)]
pub struct CheckoutParams {
    pub customer_id: String,
    pub price_id: String,
    pub user_id: String,
    pub plan: String,
    pub success_url: String,
    pub cancel_url: String,
    pub trial_period_days: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProviderSubscription {
    pub status: String,
    pub plan: Option<String>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: bool,
}

/// The hosted payment provider behind the billing API.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a customer tagged with our user id; returns the customer id.
    async fn create_customer(&self, user_id: &str) -> Result<String, ProviderError>;

    async fn create_checkout_session(
        &self,
        params: &CheckoutParams,
    ) -> Result<CheckoutSession, ProviderError>;

    /// Returns the URL of a self-service portal session.
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, ProviderError>;

    /// Most recent subscription of the customer, in any status.
    async fn latest_subscription(
        &self,
        customer_id: &str,
    ) -> Result<Option<ProviderSubscription>, ProviderError>;
}

#[derive(Deserialize)]
struct IdObject {
    id: String,
}

#[derive(Deserialize)]
struct SessionObject {
    id: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct SubscriptionList {
    data: Vec<SubscriptionObject>,
}

#[derive(Deserialize)]
struct SubscriptionObject {
    status: String,
    #[serde(default)]
    metadata: std::collections::HashMap<String, String>,
    current_period_end: Option<i64>,
    #[serde(default)]
    cancel_at_period_end: bool,
}

/// Stripe REST client. Requests are form encoded and authenticated with the
/// secret key as a bearer token.
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(client: reqwest::Client, api_base: &str, secret_key: &str) -> Self {
        StripeClient {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.api_base, endpoint);
        tracing::debug!(%url, "Provider POST");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", idempotency_key())
            .form(form)
            .send()
            .await?;
        decode_response(resp).await
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.api_base, endpoint);
        tracing::debug!(%url, "Provider GET");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .query(params)
            .send()
            .await?;
        decode_response(resp).await
    }
}

async fn decode_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await?;
        let message = error_message_from_text(&text)
            .unwrap_or_else(|| format!("provider returned {}", status));
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        });
    }
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))
}

fn idempotency_key() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn pair(k: &str, v: impl Into<String>) -> (String, String) {
    (k.to_string(), v.into())
}

/// Form fields of a subscription-mode checkout session.
pub fn checkout_form(params: &CheckoutParams) -> Vec<(String, String)> {
    vec![
        pair("customer", &params.customer_id),
        pair("mode", "subscription"),
        pair("payment_method_types[0]", "card"),
        pair("line_items[0][price]", &params.price_id),
        pair("line_items[0][quantity]", "1"),
        pair("success_url", &params.success_url),
        pair("cancel_url", &params.cancel_url),
        pair("metadata[user_id]", &params.user_id),
        pair("metadata[plan]", &params.plan),
        pair("subscription_data[trial_period_days]", params.trial_period_days.to_string()),
        pair("subscription_data[metadata][user_id]", &params.user_id),
        pair("subscription_data[metadata][plan]", &params.plan),
        pair("allow_promotion_codes", "true"),
    ]
}

pub fn timestamp_to_datetime(ts: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(ts, 0).single()
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_customer(&self, user_id: &str) -> Result<String, ProviderError> {
        let customer: IdObject = self
            .post_form("/v1/customers", &[pair("metadata[user_id]", user_id)])
            .await?;
        Ok(customer.id)
    }

    async fn create_checkout_session(
        &self,
        params: &CheckoutParams,
    ) -> Result<CheckoutSession, ProviderError> {
        let session: SessionObject = self
            .post_form("/v1/checkout/sessions", &checkout_form(params))
            .await?;
        let checkout_url = session
            .url
            .ok_or_else(|| ProviderError::Decode("checkout session has no url".into()))?;
        Ok(CheckoutSession {
            checkout_url,
            session_id: session.id,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, ProviderError> {
        let session: SessionObject = self
            .post_form(
                "/v1/billing_portal/sessions",
                &[pair("customer", customer_id), pair("return_url", return_url)],
            )
            .await?;
        session
            .url
            .ok_or_else(|| ProviderError::Decode("portal session has no url".into()))
    }

    async fn latest_subscription(
        &self,
        customer_id: &str,
    ) -> Result<Option<ProviderSubscription>, ProviderError> {
        let list: SubscriptionList = self
            .get(
                "/v1/subscriptions",
                &[("customer", customer_id), ("status", "all"), ("limit", "1")],
            )
            .await?;
        Ok(list.data.into_iter().next().map(|sub| ProviderSubscription {
            status: sub.status,
            plan: sub.metadata.get("plan").cloned(),
            current_period_end: sub.current_period_end.and_then(timestamp_to_datetime),
            cancel_at_period_end: sub.cancel_at_period_end,
        }))
    }
}
