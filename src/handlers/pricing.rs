use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::catalog::find_plan;
use crate::models::{AppState, BillingInterval};
use crate::templates::PricingTemplate;

use super::helpers::{render_template, render_with_status};

pub const CANCELED_NOTICE: &str = "Checkout was canceled. You have not been charged.";

#[derive(Debug, Default, Deserialize)]
pub struct PricingQuery {
    pub interval: Option<String>,
    pub canceled: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub plan_id: String,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn pricing_get(Query(q): Query<PricingQuery>) -> impl IntoResponse {
    let interval = BillingInterval::from_query(q.interval.as_deref());
    let mut page = PricingTemplate::new("", interval);
    if q.canceled.as_deref() == Some("true") {
        page.notice = Some(CANCELED_NOTICE.to_string());
    }
    render_template(page)
}

/// Stand-in identity for visitors without an account. Not a real user id.
pub fn placeholder_user_id() -> String {
    format!("user_{}", chrono::Utc::now().timestamp_millis())
}

fn pricing_with_error(status: StatusCode, interval: BillingInterval, message: String) -> Response {
    let mut page = PricingTemplate::new("", interval);
    page.checkout_error = Some(message);
    render_with_status(status, page)
}

pub async fn subscribe_post(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> impl IntoResponse {
    let interval = BillingInterval::from_query(form.interval.as_deref());
    let plan_id = form.plan_id.trim();
    let Some(plan) = find_plan(plan_id) else {
        tracing::warn!(plan_id, "Subscribe attempt for unknown plan");
        return pricing_with_error(
            StatusCode::BAD_REQUEST,
            interval,
            format!("Unknown plan: {}", plan_id),
        );
    };
    if plan.is_free() {
        return Redirect::to("/signup").into_response();
    }

    let user_id = form
        .user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(placeholder_user_id);

    match state.checkout.redirect_to_checkout(plan.id, &user_id).await {
        Ok(session) => {
            tracing::info!(plan = plan.id, %user_id, session_id = %session.session_id, "Redirecting to checkout");
            Redirect::to(&session.checkout_url).into_response()
        }
        Err(e) => {
            tracing::error!(%e, plan = plan.id, %user_id, "Checkout failed");
            pricing_with_error(
                StatusCode::BAD_GATEWAY,
                interval,
                format!("{} Please try again.", e),
            )
        }
    }
}
