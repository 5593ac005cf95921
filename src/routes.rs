use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::CORS_ALLOWED_ORIGINS;
use crate::handlers;
use crate::models::{ApiState, AppState};
use crate::theme;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

/// The marketing site: landing, pricing, sign-up and the `/api` proxy.
pub fn build_site(state: AppState) -> Router {
    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet = theme::stylesheet(state.custom_css.as_deref().unwrap_or(DEFAULT_STYLESHEET));

    let assets = Router::new()
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .route("/static/site.js", get(handlers::pages::script_get))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        ));

    Router::new()
        .route("/", get(handlers::pages::landing_get))
        .route("/pricing", get(handlers::pricing::pricing_get))
        .route("/pricing/subscribe", post(handlers::pricing::subscribe_post))
        .route("/signup", get(handlers::pages::signup_get))
        .route("/api", any(handlers::proxy::proxy_api))
        .route("/api/", any(handlers::proxy::proxy_api))
        .route("/api/*rest", any(handlers::proxy::proxy_api))
        .merge(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The billing backend that `/api` is normally proxied to.
pub fn build_api(state: ApiState) -> Router {
    let origins: Vec<HeaderValue> = CORS_ALLOWED_ORIGINS
        .iter()
        .map(|o| HeaderValue::from_static(*o))
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let billing = Router::new()
        .route("/pricing", get(handlers::billing::pricing_get))
        .route(
            "/create-checkout-session",
            post(handlers::billing::create_checkout_session),
        )
        .route(
            "/create-portal-session",
            post(handlers::billing::create_portal_session),
        )
        .route("/subscription/:user_id", get(handlers::billing::subscription_get))
        .route("/webhook", post(handlers::billing::webhook_post));

    Router::new()
        .route("/health", get(handlers::system::health_get))
        .nest("/api/v1/billing", billing)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
