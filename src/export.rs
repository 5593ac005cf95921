//! Static export: renders the site into plain files for any static host.
//!
//! The checkout form still posts to `/pricing/subscribe`, so a static
//! deployment needs the site server (or an equivalent rewrite) for paid
//! plans. Everything else works from the exported files alone.

use std::path::{Path, PathBuf};

use askama::Template;

use crate::catalog::{find_plan, FREE_PLAN_ID};
use crate::error::ExportError;
use crate::handlers::pages::SITE_SCRIPT;
use crate::models::BillingInterval;
use crate::routes::DEFAULT_STYLESHEET;
use crate::templates::{LandingTemplate, PricingTemplate, SignupTemplate};
use crate::theme;

async fn write_file(root: &Path, rel: &str, contents: &str) -> Result<PathBuf, ExportError> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, contents).await?;
    tracing::debug!(path = %path.display(), "Wrote export file");
    Ok(path)
}

fn pricing_page(base_path: &str, interval: BillingInterval) -> PricingTemplate {
    let mut page = PricingTemplate::new(base_path, interval);
    page.month_href = format!("{}/pricing/", page.asset_prefix);
    page.year_href = format!("{}/pricing/yearly/", page.asset_prefix);
    page
}

/// Render every page under `out_dir`; returns the written paths.
pub async fn export_site(out_dir: &Path, base_path: &str) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();

    let landing = LandingTemplate::new(base_path).render()?;
    written.push(write_file(out_dir, "index.html", &landing).await?);

    let monthly = pricing_page(base_path, BillingInterval::Month).render()?;
    written.push(write_file(out_dir, "pricing/index.html", &monthly).await?);

    let yearly = pricing_page(base_path, BillingInterval::Year).render()?;
    written.push(write_file(out_dir, "pricing/yearly/index.html", &yearly).await?);

    if let Some(plan) = find_plan(FREE_PLAN_ID) {
        let signup = SignupTemplate::new(base_path, plan).render()?;
        written.push(write_file(out_dir, "signup/index.html", &signup).await?);
    }

    let css = theme::stylesheet(DEFAULT_STYLESHEET);
    written.push(write_file(out_dir, "static/styles.css", &css).await?);
    written.push(write_file(out_dir, "static/site.js", SITE_SCRIPT).await?);

    tracing::info!(files = written.len(), out = %out_dir.display(), "Static export complete");
    Ok(written)
}
