//! Server-side HTML for every view.
//!
//! Pages are self-contained (inline CSS, no scripts, no external assets).
//! Every string that came from the backend goes through [`escape`].

pub mod apl;
pub mod guide;
pub mod landing;
pub mod layout;
pub mod map;
pub mod pressure;
pub mod risk;
pub mod stats;

/// Text shown for any missing value.
pub const MISSING: &str = "N/A";

/// Escape text for HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `value` with a fixed number of decimals, or `N/A`.
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => MISSING.to_string(),
    }
}

/// A fraction shown as a percentage with one decimal: `0.125` → `12.5%`.
pub fn percent(fraction: Option<f64>) -> String {
    match fraction {
        Some(f) if f.is_finite() => format!("{:.1}%", f * 100.0),
        _ => MISSING.to_string(),
    }
}

/// Value as the backend sent it (shortest round-trip form).
pub fn plain(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

pub fn count(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_string(), thousands)
}

/// Group digits by three with a space, French style: `12345` → `12 345`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
