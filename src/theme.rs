//! Design tokens, emitted as CSS custom properties ahead of the stylesheet.

use crate::site::SITE_META;

pub const COLORS: &[(&str, &str)] = &[
    ("background", "#0b0b14"),
    ("surface", "#15152a"),
    ("border", "#2a2a4a"),
    ("text", "#f4f4fb"),
    ("muted", "#a0a0c0"),
    ("brand-50", "#f3efff"),
    ("brand-400", "#a78bfa"),
    ("brand-500", "#8b5cf6"),
    ("brand-600", "#7c3aed"),
    ("accent", "#22d3ee"),
    ("danger", "#f43f5e"),
];

pub const RADII: &[(&str, &str)] = &[("sm", "6px"), ("md", "12px"), ("lg", "20px"), ("full", "9999px")];

// Keyframe durations used by the hero and card animations.
pub const MOTION: &[(&str, &str)] = &[("fast", "150ms"), ("base", "300ms"), ("slow", "1200ms")];

pub fn css_variables() -> String {
    let mut out = String::from(":root {\n");
    for (name, value) in COLORS {
        out.push_str(&format!("  --color-{}: {};\n", name, value));
    }
    for (name, value) in RADII {
        out.push_str(&format!("  --radius-{}: {};\n", name, value));
    }
    for (name, value) in MOTION {
        out.push_str(&format!("  --motion-{}: {};\n", name, value));
    }
    out.push_str(&format!(
        "  --font-sans: \"{}\", ui-sans-serif, system-ui, sans-serif;\n",
        SITE_META.font_sans
    ));
    out.push_str(&format!(
        "  --font-mono: \"{}\", ui-monospace, monospace;\n",
        SITE_META.font_mono
    ));
    out.push_str("}\n");
    out
}

/// Full stylesheet served at `/static/styles.css`.
pub fn stylesheet(base: &str) -> String {
    format!("{}\n{}", css_variables(), base)
}
