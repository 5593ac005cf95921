//! The plan catalog shown on the pricing page and served by the billing API.

use crate::models::{BillingInterval, Plan};

pub const TRIAL_DAYS: u32 = 7;
pub const CURRENCY: &str = "usd";
pub const FREE_PLAN_ID: &str = "free";

pub static PLANS: [Plan; 5] = [
    Plan {
        id: FREE_PLAN_ID,
        name: "Free",
        price_cents: 0,
        interval: None,
        features: &["10 problems/month", "Basic explanations", "Text input only"],
        popular: false,
        savings: None,
        cta: "Get started",
    },
    Plan {
        id: "student_monthly",
        name: "Student",
        price_cents: 999,
        interval: Some(BillingInterval::Month),
        features: &[
            "Unlimited problems",
            "Visual explanations",
            "Photo & voice upload",
            "Persistent memory",
            "All subjects",
        ],
        popular: true,
        savings: None,
        cta: "Start free trial",
    },
    Plan {
        id: "student_yearly",
        name: "Student (Annual)",
        price_cents: 9999,
        interval: Some(BillingInterval::Year),
        features: &["Everything in Student Monthly", "2 months free"],
        popular: false,
        savings: Some("Save $20"),
        cta: "Start free trial",
    },
    Plan {
        id: "family_monthly",
        name: "Family",
        price_cents: 1999,
        interval: Some(BillingInterval::Month),
        features: &[
            "Up to 5 users",
            "Everything in Student",
            "Parent dashboard",
            "Progress tracking",
            "Priority support",
        ],
        popular: false,
        savings: None,
        cta: "Start free trial",
    },
    Plan {
        id: "family_yearly",
        name: "Family (Annual)",
        price_cents: 19999,
        interval: Some(BillingInterval::Year),
        features: &["Everything in Family Monthly", "2 months free"],
        popular: false,
        savings: Some("Save $40"),
        cta: "Start free trial",
    },
];

pub fn all_plans() -> &'static [Plan] {
    &PLANS
}

pub fn find_plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.id == id)
}

/// Plans listed under the pricing toggle: the free tier plus every plan
/// whose id carries the interval token, in catalog order.
pub fn plans_for_interval(interval: BillingInterval) -> Vec<&'static Plan> {
    PLANS
        .iter()
        .filter(|p| p.id == FREE_PLAN_ID || p.id.contains(interval.id_token()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(plans: &[&Plan]) -> Vec<&'static str> {
        plans.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_monthly_listing() {
        let plans = plans_for_interval(BillingInterval::Month);
        assert_eq!(ids(&plans), vec!["free", "student_monthly", "family_monthly"]);
    }

    #[test]
    fn test_yearly_listing() {
        let plans = plans_for_interval(BillingInterval::Year);
        assert_eq!(ids(&plans), vec!["free", "student_yearly", "family_yearly"]);
    }

    #[test]
    fn test_listing_matches_declared_interval() {
        for interval in [BillingInterval::Month, BillingInterval::Year] {
            for plan in plans_for_interval(interval) {
                assert!(plan.is_free() || plan.interval == Some(interval), "{}", plan.id);
            }
        }
    }

    #[test]
    fn test_only_free_plan_is_free() {
        let free: Vec<_> = PLANS.iter().filter(|p| p.is_free()).collect();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, FREE_PLAN_ID);
        assert!(free[0].interval.is_none());
    }

    #[test]
    fn test_price_labels() {
        assert_eq!(find_plan("free").unwrap().price_label(), "$0");
        assert_eq!(find_plan("student_monthly").unwrap().price_label(), "$9.99");
        assert_eq!(find_plan("family_yearly").unwrap().price_label(), "$199.99");
        assert_eq!(find_plan("family_yearly").unwrap().interval_label(), "/year");
        assert!(find_plan("enterprise").is_none());
    }
}
