use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::ApiState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub services: BTreeMap<&'static str, &'static str>,
}

pub async fn health_get(State(state): State<ApiState>) -> Json<HealthResponse> {
    let mut services = BTreeMap::new();
    services.insert("api", "operational");
    services.insert(
        "billing",
        if state.provider.is_some() { "operational" } else { "not_configured" },
    );
    services.insert(
        "webhooks",
        if state.webhook_secret.is_empty() { "not_configured" } else { "operational" },
    );
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        services,
    })
}
