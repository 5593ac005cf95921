mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::get;
use lucidia::api::{build_http_client, PaymentProvider, StripeClient};
use lucidia::models::{ApiState, SubscriptionRecord};
use lucidia::routes::build_api;
use lucidia::services::webhook::compute_signature;
use lucidia::services::BillingStore;

const SECRET_KEY: &str = "sk_test_123";
const WEBHOOK_SECRET: &str = "whsec_test";

fn api_state(provider: Option<Arc<dyn PaymentProvider>>, store: BillingStore) -> ApiState {
    ApiState {
        store,
        provider,
        webhook_secret: WEBHOOK_SECRET.into(),
        public_base_url: "https://lucidia.ai".into(),
    }
}

fn stripe(server: &MockServer) -> Option<Arc<dyn PaymentProvider>> {
    let client = build_http_client(5).unwrap();
    Some(Arc::new(StripeClient::new(client, &server.uri(), SECRET_KEY)))
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn signed_webhook(payload: &str) -> Request<Body> {
    let ts = chrono::Utc::now().timestamp();
    let sig = compute_signature(payload.as_bytes(), WEBHOOK_SECRET, ts);
    Request::builder()
        .method("POST")
        .uri("/api/v1/billing/webhook")
        .header("Stripe-Signature", format!("t={},v1={}", ts, sig))
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn json_body(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let text = common::body_string(resp).await;
    (status, serde_json::from_str(&text).unwrap())
}

#[tokio::test]
async fn test_health_reports_billing_state() {
    let app = build_api(api_state(None, BillingStore::new()));
    let (status, body) = json_body(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["billing"], "not_configured");
    assert_eq!(body["services"]["webhooks"], "operational");
}

#[tokio::test]
async fn test_pricing_payload() {
    let app = build_api(api_state(None, BillingStore::new()));
    let (status, body) = json_body(app, get("/api/v1/billing/pricing")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trial_days"], 7);
    assert_eq!(body["currency"], "usd");
    let plans = body["plans"].as_array().unwrap();
    assert_eq!(plans.len(), 5);
    assert_eq!(plans[0]["id"], "free");
    assert_eq!(plans[0]["interval"], Value::Null);
    assert_eq!(plans[1]["price"], 9.99);
    assert_eq!(plans[1]["interval"], "month");
    assert_eq!(plans[1]["popular"], true);
    assert_eq!(plans[2]["savings"], "Save $20");
}

#[tokio::test]
async fn test_checkout_requires_configuration() {
    let app = build_api(api_state(None, BillingStore::new()));
    let (status, body) = json_body(
        app,
        json_post(
            "/api/v1/billing/create-checkout-session",
            json!({"plan": "student_monthly", "user_id": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Stripe not configured");
}

#[tokio::test]
async fn test_checkout_rejects_unknown_plan() {
    let server = MockServer::start().await;
    let app = build_api(api_state(stripe(&server), BillingStore::new()));
    let (status, body) = json_body(
        app,
        json_post(
            "/api/v1/billing/create-checkout-session",
            json!({"plan": "free", "user_id": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid plan: free");
}

#[tokio::test]
async fn test_checkout_creates_customer_once_and_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .and(header("authorization", "Bearer sk_test_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cus_42"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("customer=cus_42"))
        .and(body_string_contains("mode=subscription"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_a1",
            "url": "https://checkout.stripe.com/c/pay/cs_test_a1"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let store = BillingStore::new();
    let app = build_api(api_state(stripe(&server), store.clone()));
    let request = || {
        json_post(
            "/api/v1/billing/create-checkout-session",
            json!({"plan": "student_monthly", "user_id": "u1"}),
        )
    };

    let (status, body) = json_body(app.clone(), request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checkout_url"], "https://checkout.stripe.com/c/pay/cs_test_a1");
    assert_eq!(body["session_id"], "cs_test_a1");
    assert_eq!(store.customer_for("u1").as_deref(), Some("cus_42"));

    // second checkout reuses the remembered customer
    let (status, _) = json_body(app, request()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_provider_error_becomes_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": {"message": "No such price: 'price_student_monthly'"}})),
        )
        .mount(&server)
        .await;

    let store = BillingStore::new();
    store.remember_customer("u1", "cus_1");
    let app = build_api(api_state(stripe(&server), store));
    let (status, body) = json_body(
        app,
        json_post(
            "/api/v1/billing/create-checkout-session",
            json!({"plan": "student_monthly", "user_id": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No such price: 'price_student_monthly'");
}

#[tokio::test]
async fn test_plain_text_provider_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/billing_portal/sessions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream connect error"))
        .mount(&server)
        .await;

    let app = build_api(api_state(stripe(&server), BillingStore::new()));
    let (status, body) = json_body(
        app,
        json_post("/api/v1/billing/create-portal-session", json!({"customer_id": "cus_7"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "provider returned 503 Service Unavailable");
}

#[tokio::test]
async fn test_malformed_bodies_answer_with_detail() {
    let app = build_api(api_state(None, BillingStore::new()));

    let (status, body) = json_body(
        app.clone(),
        json_post("/api/v1/billing/create-checkout-session", json!({"user_id": "u1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("missing field `plan`"));

    let (status, body) = json_body(
        app,
        json_post("/api/v1/billing/create-portal-session", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("customer_id"));
}

#[tokio::test]
async fn test_portal_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/billing_portal/sessions"))
        .and(body_string_contains("customer=cus_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bps_1",
            "url": "https://billing.stripe.com/p/session/bps_1"
        })))
        .mount(&server)
        .await;

    let app = build_api(api_state(stripe(&server), BillingStore::new()));
    let (status, body) = json_body(
        app,
        json_post("/api/v1/billing/create-portal-session", json!({"customer_id": "cus_7"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["portal_url"], "https://billing.stripe.com/p/session/bps_1");
}

#[tokio::test]
async fn test_subscription_status_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscriptions"))
        .and(query_param("customer", "cus_remote"))
        .and(query_param("status", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "status": "trialing",
                "metadata": {"plan": "family_monthly"},
                "current_period_end": 1_800_000_000,
                "cancel_at_period_end": false
            }]
        })))
        .mount(&server)
        .await;

    let store = BillingStore::new();
    store.put_subscription(
        "local",
        SubscriptionRecord {
            status: "active".into(),
            plan: Some("student_yearly".into()),
            ..Default::default()
        },
    );
    store.remember_customer("remote", "cus_remote");
    let app = build_api(api_state(stripe(&server), store));

    let (_, body) = json_body(app.clone(), get("/api/v1/billing/subscription/local")).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["plan"], "student_yearly");

    let (_, body) = json_body(app.clone(), get("/api/v1/billing/subscription/remote")).await;
    assert_eq!(body["status"], "trialing");
    assert_eq!(body["plan"], "family_monthly");
    assert!(body["current_period_end"].is_string());

    let (_, body) = json_body(app, get("/api/v1/billing/subscription/stranger")).await;
    assert_eq!(body["status"], "none");
    assert_eq!(body["cancel_at_period_end"], false);
}

#[tokio::test]
async fn test_webhook_updates_subscription() {
    let store = BillingStore::new();
    let app = build_api(api_state(None, store.clone()));
    let payload = json!({
        "type": "checkout.session.completed",
        "data": {"object": {
            "customer": "cus_5",
            "subscription": "sub_5",
            "metadata": {"user_id": "u5", "plan": "student_monthly"}
        }}
    })
    .to_string();

    let (status, body) = json_body(app.clone(), signed_webhook(&payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(store.subscription("u5").unwrap().status, "active");

    let (_, body) = json_body(app, get("/api/v1/billing/subscription/u5")).await;
    assert_eq!(body["plan"], "student_monthly");
}

#[tokio::test]
async fn test_webhook_rejects_bad_signature_and_payload() {
    let store = BillingStore::new();
    let app = build_api(api_state(None, store.clone()));

    let forged = Request::builder()
        .method("POST")
        .uri("/api/v1/billing/webhook")
        .header("Stripe-Signature", "t=1,v1=deadbeef")
        .body(Body::from(r#"{"type":"checkout.session.completed"}"#))
        .unwrap();
    let (status, body) = json_body(app.clone(), forged).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid signature");

    let (status, body) = json_body(app, signed_webhook("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid payload");
}

#[tokio::test]
async fn test_webhook_requires_secret() {
    let mut state = api_state(None, BillingStore::new());
    state.webhook_secret = String::new();
    let app = build_api(state);
    let (status, body) = json_body(app, signed_webhook("{}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Webhook secret not configured");
}
