//! Verification and handling of payment provider webhooks.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

use crate::api::stripe::timestamp_to_datetime;
use crate::error::WebhookError;
use crate::models::SubscriptionRecord;

use super::BillingStore;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: Value,
}

/// Check a `Stripe-Signature` header (`t=<unix>,v1=<hex>[,v1=...]`) against
/// the raw payload. The signed message is `"<t>.<payload>"`.
pub fn verify_signature(
    payload: &[u8],
    header: Option<&str>,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), WebhookError> {
    let header = header.ok_or(WebhookError::MissingSignature)?;
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<Vec<u8>> = Vec::new();
    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => {
                if let Ok(sig) = hex::decode(value) {
                    signatures.push(sig);
                }
            }
            _ => {}
        }
    }
    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader);
    }

    let matched = signatures.iter().any(|sig| {
        // constant-time comparison
        signing_mac(secret, timestamp, payload).verify_slice(sig).is_ok()
    });
    if !matched {
        return Err(WebhookError::SignatureMismatch);
    }
    if (now - timestamp).abs() > tolerance_secs {
        return Err(WebhookError::TimestampOutOfTolerance);
    }
    Ok(())
}

fn signing_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Hex signature for `payload` at `timestamp`; the counterpart of
/// [`verify_signature`], used to sign test fixtures and local replays.
pub fn compute_signature(payload: &[u8], secret: &str, timestamp: i64) -> String {
    hex::encode(signing_mac(secret, timestamp, payload).finalize().into_bytes())
}

pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent, WebhookError> {
    serde_json::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
}

fn str_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn metadata_field(obj: &Value, key: &str) -> Option<String> {
    obj.get("metadata").and_then(|m| str_field(m, key))
}

/// Update the billing store from one event. Returns the affected user, if
/// any; unknown event types and unknown users are ignored.
pub fn apply_event(store: &BillingStore, event: &WebhookEvent) -> Option<String> {
    let obj = &event.data.object;
    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let user_id = metadata_field(obj, "user_id")?;
            let plan = metadata_field(obj, "plan");
            let customer_id = str_field(obj, "customer");
            store.put_subscription(
                &user_id,
                SubscriptionRecord {
                    status: "active".into(),
                    plan: plan.clone(),
                    customer_id: customer_id.clone(),
                    subscription_id: str_field(obj, "subscription"),
                    ..Default::default()
                },
            );
            if let Some(cid) = customer_id {
                store.remember_customer(&user_id, &cid);
            }
            tracing::info!(%user_id, plan = plan.as_deref().unwrap_or(""), "Subscription started");
            Some(user_id)
        }
        "customer.subscription.updated" => {
            let user_id = metadata_field(obj, "user_id")?;
            let status = str_field(obj, "status").unwrap_or_default();
            let cancel = obj
                .get("cancel_at_period_end")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let period_end = obj
                .get("current_period_end")
                .and_then(|v| v.as_i64())
                .and_then(timestamp_to_datetime);
            let updated = store.update_subscription(&user_id, |rec| {
                rec.status = status.clone();
                rec.cancel_at_period_end = cancel;
                rec.current_period_end = period_end;
            });
            if !updated {
                return None;
            }
            tracing::info!(%user_id, %status, "Subscription updated");
            Some(user_id)
        }
        "customer.subscription.deleted" => {
            let user_id = metadata_field(obj, "user_id")?;
            if !store.update_subscription(&user_id, |rec| rec.status = "canceled".into()) {
                return None;
            }
            tracing::info!(%user_id, "Subscription canceled");
            Some(user_id)
        }
        "invoice.payment_failed" => {
            let customer_id = str_field(obj, "customer")?;
            let user_id = store.user_for_customer(&customer_id)?;
            store.update_subscription(&user_id, |rec| rec.status = "past_due".into());
            tracing::warn!(%user_id, "Payment failed");
            Some(user_id)
        }
        other => {
            tracing::debug!(event_type = other, "Ignoring webhook event");
            None
        }
    }
}
