pub mod billing_store;
pub mod webhook;

pub use billing_store::BillingStore;
pub use webhook::{apply_event, verify_signature, WebhookEvent};
