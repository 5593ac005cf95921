use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the billing store remembers about a user's subscription.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscriptionRecord {
    pub status: String,
    pub plan: Option<String>,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub user_id: String,
    /// active, canceled, past_due, trialing or none
    pub status: String,
    pub plan: Option<String>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: bool,
}

impl SubscriptionStatus {
    pub fn none(user_id: &str) -> Self {
        SubscriptionStatus {
            user_id: user_id.to_string(),
            status: "none".into(),
            plan: None,
            current_period_end: None,
            cancel_at_period_end: false,
        }
    }

    pub fn from_record(user_id: &str, rec: &SubscriptionRecord) -> Self {
        SubscriptionStatus {
            user_id: user_id.to_string(),
            status: if rec.status.is_empty() { "none".into() } else { rec.status.clone() },
            plan: rec.plan.clone(),
            current_period_end: rec.current_period_end,
            cancel_at_period_end: rec.cancel_at_period_end,
        }
    }
}
