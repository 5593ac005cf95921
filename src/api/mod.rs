pub mod checkout;
pub mod client;
pub mod stripe;

pub use checkout::{BackendCheckout, CheckoutGateway};
pub use client::build_http_client;
pub use stripe::{CheckoutParams, PaymentProvider, ProviderSubscription, StripeClient};
