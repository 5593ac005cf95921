pub mod api_state;
pub mod app_state;
pub mod billing_interval;
pub mod checkout;
pub mod plan;
pub mod subscription;

pub use api_state::ApiState;
pub use app_state::AppState;
pub use billing_interval::BillingInterval;
pub use checkout::{CheckoutSession, CreateCheckoutRequest, CreatePortalRequest, PortalSession};
pub use plan::Plan;
pub use subscription::{SubscriptionRecord, SubscriptionStatus};
