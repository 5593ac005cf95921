//! Document metadata and font configuration shared by every page.

#[derive(Clone, Debug)]
pub struct SiteMeta {
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub theme_color: &'static str,
    pub font_sans: &'static str,
    pub font_mono: &'static str,
    /// Stylesheet that loads the web fonts.
    pub font_href: &'static str,
}

pub const SITE_META: SiteMeta = SiteMeta {
    title: "Lucidia - AI-powered learning that actually works",
    description: "Snap a photo, ask out loud, or type it in. Lucidia explains any problem step by step, shows it visually, and remembers how you learn.",
    keywords: &["learning", "tutor", "math", "physics", "chemistry", "homework help", "AI"],
    theme_color: "#0b0b14",
    font_sans: "Inter",
    font_mono: "JetBrains Mono",
    font_href: "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&family=JetBrains+Mono:wght@400;600&display=swap",
};

impl SiteMeta {
    pub fn keywords_csv(&self) -> String {
        self.keywords.join(", ")
    }

    /// Page title with the site name appended, or the bare site title for
    /// the landing page.
    pub fn page_title(&self, page: &str) -> String {
        if page.is_empty() {
            self.title.to_string()
        } else {
            format!("{} | Lucidia", page)
        }
    }
}
