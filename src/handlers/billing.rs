use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{CheckoutParams, PaymentProvider};
use crate::catalog::{all_plans, CURRENCY, TRIAL_DAYS};
use crate::config::{get_price_id, DEFAULT_WEBHOOK_TOLERANCE_SECS};
use crate::error::ApiError;
use crate::models::{
    ApiState, BillingInterval, CheckoutSession, CreateCheckoutRequest, CreatePortalRequest, Plan,
    PortalSession, SubscriptionStatus,
};
use crate::services::webhook::parse_event;
use crate::services::{apply_event, verify_signature};
use crate::utils::absolute_url;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// A plan as the public pricing endpoint reports it.
#[derive(Serialize)]
pub struct PlanPayload {
    pub id: &'static str,
    pub name: &'static str,
    pub price: f64,
    pub interval: Option<BillingInterval>,
    pub features: &'static [&'static str],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub popular: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<&'static str>,
}

impl From<&Plan> for PlanPayload {
    fn from(p: &Plan) -> Self {
        PlanPayload {
            id: p.id,
            name: p.name,
            price: p.price(),
            interval: p.interval,
            features: p.features,
            popular: p.popular,
            savings: p.savings,
        }
    }
}

fn configured_provider(state: &ApiState) -> Result<&dyn PaymentProvider, ApiError> {
    state
        .provider
        .as_deref()
        .ok_or_else(|| ApiError::internal("Stripe not configured"))
}

pub async fn pricing_get() -> Json<Value> {
    let plans: Vec<PlanPayload> = all_plans().iter().map(PlanPayload::from).collect();
    Json(json!({
        "plans": plans,
        "trial_days": TRIAL_DAYS,
        "currency": CURRENCY,
    }))
}

pub async fn create_checkout_session(
    State(state): State<ApiState>,
    payload: Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutSession>, ApiError> {
    let Json(req) = payload?;
    let provider = configured_provider(&state)?;
    let price_id = get_price_id(&req.plan)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid plan: {}", req.plan)))?;

    let customer_id = match state.store.customer_for(&req.user_id) {
        Some(cid) => cid,
        None => {
            let cid = provider.create_customer(&req.user_id).await?;
            state.store.remember_customer(&req.user_id, &cid);
            tracing::info!(user_id = %req.user_id, customer_id = %cid, "Created provider customer");
            cid
        }
    };

    let params = CheckoutParams {
        customer_id,
        price_id,
        user_id: req.user_id.clone(),
        plan: req.plan.clone(),
        success_url: req
            .success_url
            .unwrap_or_else(|| absolute_url(&state.public_base_url, "/dashboard?success=true")),
        cancel_url: req
            .cancel_url
            .unwrap_or_else(|| absolute_url(&state.public_base_url, "/pricing?canceled=true")),
        trial_period_days: TRIAL_DAYS,
    };
    let session = provider.create_checkout_session(&params).await?;
    tracing::info!(user_id = %req.user_id, plan = %req.plan, session_id = %session.session_id, "Checkout session created");
    Ok(Json(session))
}

pub async fn create_portal_session(
    State(state): State<ApiState>,
    payload: Result<Json<CreatePortalRequest>, JsonRejection>,
) -> Result<Json<PortalSession>, ApiError> {
    let Json(req) = payload?;
    let provider = configured_provider(&state)?;
    let return_url = req
        .return_url
        .unwrap_or_else(|| absolute_url(&state.public_base_url, "/dashboard"));
    let portal_url = provider
        .create_portal_session(&req.customer_id, &return_url)
        .await?;
    Ok(Json(PortalSession { portal_url }))
}

pub async fn subscription_get(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> Json<SubscriptionStatus> {
    if let Some(rec) = state.store.subscription(&user_id) {
        return Json(SubscriptionStatus::from_record(&user_id, &rec));
    }

    if let (Some(customer_id), Some(provider)) =
        (state.store.customer_for(&user_id), state.provider.as_deref())
    {
        match provider.latest_subscription(&customer_id).await {
            Ok(Some(sub)) => {
                return Json(SubscriptionStatus {
                    user_id,
                    status: sub.status,
                    plan: sub.plan,
                    current_period_end: sub.current_period_end,
                    cancel_at_period_end: sub.cancel_at_period_end,
                });
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(%e, %user_id, "Subscription lookup failed"),
        }
    }
    Json(SubscriptionStatus::none(&user_id))
}

pub async fn webhook_post(
    State(state): State<ApiState>,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<Json<Value>, ApiError> {
    if state.webhook_secret.is_empty() {
        return Err(ApiError::internal("Webhook secret not configured"));
    }
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    let now = chrono::Utc::now().timestamp();
    if let Err(e) = verify_signature(
        &payload,
        signature,
        &state.webhook_secret,
        now,
        DEFAULT_WEBHOOK_TOLERANCE_SECS,
    ) {
        tracing::warn!(%e, "Rejected webhook");
        return Err(e.into());
    }
    let event = parse_event(&payload)?;
    tracing::debug!(event_type = %event.event_type, "Webhook received");
    apply_event(&state.store, &event);
    Ok(Json(json!({ "status": "success" })))
}
