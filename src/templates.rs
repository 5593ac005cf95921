use askama::Template;

use crate::models::{BillingInterval, Plan};
use crate::site::{SiteMeta, SITE_META};

/// A feature card on the landing page.
pub struct Feature {
    pub title: &'static str,
    pub body: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "Snap, speak or type",
        body: "Photograph a worksheet, say the question out loud, or type it. Lucidia reads all three.",
    },
    Feature {
        title: "See it, don't just read it",
        body: "Graphs, diagrams and animations walk through each step so the idea clicks.",
    },
    Feature {
        title: "Remembers how you learn",
        body: "Your strengths and sticking points carry over from one session to the next.",
    },
    Feature {
        title: "Every subject",
        body: "Arithmetic to calculus, physics, chemistry and biology, explained at your level.",
    },
];

pub const STEPS: &[&str] = &[
    "Show Lucidia the problem you're stuck on.",
    "Follow a step-by-step explanation built for you.",
    "Practice with real-world problems until it sticks.",
];

/// Fields every page template carries for `base.html`.
pub struct PageGlobals {
    pub page_title: String,
    pub meta: SiteMeta,
    /// Path prefix for links and assets ("" when served from the root).
    pub asset_prefix: String,
}

pub fn build_page_globals(page: &str, asset_prefix: &str) -> PageGlobals {
    PageGlobals {
        page_title: SITE_META.page_title(page),
        meta: SITE_META,
        asset_prefix: asset_prefix.trim_end_matches('/').to_string(),
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub page_title: String,
    pub meta: SiteMeta,
    pub asset_prefix: String,
    pub features: &'static [Feature],
    pub steps: &'static [&'static str],
}

#[derive(Template)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub page_title: String,
    pub meta: SiteMeta,
    pub asset_prefix: String,
    pub plans: Vec<&'static Plan>,
    pub interval: BillingInterval,
    pub is_yearly: bool,
    /// Targets of the interval toggle.
    pub month_href: String,
    pub year_href: String,
    pub trial_days: u32,
    pub notice: Option<String>,
    pub checkout_error: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub page_title: String,
    pub meta: SiteMeta,
    pub asset_prefix: String,
    pub plan: &'static Plan,
}

impl LandingTemplate {
    pub fn new(asset_prefix: &str) -> Self {
        let PageGlobals {
            page_title,
            meta,
            asset_prefix,
        } = build_page_globals("", asset_prefix);
        LandingTemplate {
            page_title,
            meta,
            asset_prefix,
            features: FEATURES,
            steps: STEPS,
        }
    }
}

impl PricingTemplate {
    pub fn new(asset_prefix: &str, interval: BillingInterval) -> Self {
        let PageGlobals {
            page_title,
            meta,
            asset_prefix,
        } = build_page_globals("Pricing", asset_prefix);
        let month_href = format!("{}/pricing?interval=month", asset_prefix);
        let year_href = format!("{}/pricing?interval=year", asset_prefix);
        PricingTemplate {
            page_title,
            meta,
            asset_prefix,
            plans: crate::catalog::plans_for_interval(interval),
            interval,
            is_yearly: interval == BillingInterval::Year,
            month_href,
            year_href,
            trial_days: crate::catalog::TRIAL_DAYS,
            notice: None,
            checkout_error: None,
        }
    }
}

impl SignupTemplate {
    pub fn new(asset_prefix: &str, plan: &'static Plan) -> Self {
        let PageGlobals {
            page_title,
            meta,
            asset_prefix,
        } = build_page_globals("Sign up", asset_prefix);
        SignupTemplate {
            page_title,
            meta,
            asset_prefix,
            plan,
        }
    }
}
