use serde::{Deserialize, Serialize};

/// A hosted checkout page the browser should be sent to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub session_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    pub plan: String,
    pub user_id: String,
    #[serde(default)]
    pub success_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatePortalRequest {
    pub customer_id: String,
    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortalSession {
    pub portal_url: String,
}
