#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use once_cell::sync::Lazy;

use lucidia::api::CheckoutGateway;
use lucidia::error::CheckoutError;
use lucidia::models::{AppState, CheckoutSession};

/// Serialises tests that touch process environment variables.
pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Records calls and answers with a canned result.
pub struct FakeCheckout {
    pub calls: AtomicUsize,
    pub last: Mutex<Option<(String, String)>>,
    pub fail_with: Option<String>,
}

impl FakeCheckout {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(FakeCheckout {
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
            fail_with: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(FakeCheckout {
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
            fail_with: Some(message.to_string()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckoutGateway for FakeCheckout {
    async fn redirect_to_checkout(
        &self,
        plan_id: &str,
        user_id: &str,
    ) -> Result<CheckoutSession, CheckoutError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((plan_id.to_string(), user_id.to_string()));
        match &self.fail_with {
            Some(msg) => Err(CheckoutError::Rejected(msg.clone())),
            None => Ok(CheckoutSession {
                checkout_url: format!("https://checkout.example/c/{}", plan_id),
                session_id: "cs_test_1".into(),
            }),
        }
    }
}

pub fn site_state(api_url: &str, checkout: Arc<FakeCheckout>) -> AppState {
    AppState {
        api_url: api_url.to_string(),
        public_base_url: "http://localhost:3000".into(),
        client: lucidia::api::build_http_client(5).unwrap(),
        checkout,
        custom_css: None,
    }
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
