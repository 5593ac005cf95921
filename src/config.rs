use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_SITE_PORT: u16 = 3000;
pub const DEFAULT_API_PORT: u16 = 8000;
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Origins allowed to call the billing API from a browser.
pub const CORS_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "https://lucidia.ai",
    "https://app.lucidia.ai",
];

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Origin of the backend that `/api/*` is forwarded to.
pub fn get_api_url() -> String {
    sanitize_base_url(
        &env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        DEFAULT_API_URL,
    )
}

pub fn get_public_base_url() -> String {
    sanitize_base_url(
        &env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
        DEFAULT_PUBLIC_BASE_URL,
    )
}

pub fn get_host() -> String {
    env::var("HOST")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn get_port(default: u16) -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(default)
}

pub fn get_stripe_secret_key() -> String {
    env::var("STRIPE_SECRET_KEY").unwrap_or_default().trim().to_string()
}

pub fn get_stripe_webhook_secret() -> String {
    env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_default().trim().to_string()
}

pub fn get_stripe_api_base() -> String {
    sanitize_base_url(
        &env::var("STRIPE_API_BASE").unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.to_string()),
        DEFAULT_STRIPE_API_BASE,
    )
}

/// Provider price id for a paid plan, or `None` for plans that cannot be
/// bought (the free tier, unknown ids).
pub fn get_price_id(plan_id: &str) -> Option<String> {
    let var = match plan_id {
        "student_monthly" => "STRIPE_PRICE_STUDENT_MONTHLY",
        "student_yearly" => "STRIPE_PRICE_STUDENT_YEARLY",
        "family_monthly" => "STRIPE_PRICE_FAMILY_MONTHLY",
        "family_yearly" => "STRIPE_PRICE_FAMILY_YEARLY",
        _ => return None,
    };
    let value = env::var(var).unwrap_or_default();
    let value = value.trim();
    if value.is_empty() {
        Some(format!("price_{}", plan_id))
    } else {
        Some(value.to_string())
    }
}

pub fn sanitize_base_url(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
