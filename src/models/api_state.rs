use std::sync::Arc;

use crate::api::PaymentProvider;
use crate::services::BillingStore;

/// State shared by the billing backend.
#[derive(Clone)]
pub struct ApiState {
    pub store: BillingStore,
    /// `None` when no secret key is configured.
    pub provider: Option<Arc<dyn PaymentProvider>>,
    pub webhook_secret: String,
    pub public_base_url: String,
}
