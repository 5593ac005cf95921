use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::catalog::{find_plan, FREE_PLAN_ID};
use crate::templates::{LandingTemplate, SignupTemplate};

use super::helpers::render_template;

pub const SITE_SCRIPT: &str = include_str!("../../static/site.js");

pub async fn landing_get() -> impl IntoResponse {
    render_template(LandingTemplate::new(""))
}

pub async fn signup_get() -> impl IntoResponse {
    match find_plan(FREE_PLAN_ID) {
        Some(plan) => render_template(SignupTemplate::new("", plan)),
        None => axum::response::Redirect::to("/pricing").into_response(),
    }
}

pub async fn script_get() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/javascript")], SITE_SCRIPT)
}
