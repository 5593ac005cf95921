/// Join a site-relative path (which may carry a query) onto a base URL.
/// Absolute URLs pass through untouched.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let rest = path.trim_start_matches('/');
    if rest.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, rest)
}
