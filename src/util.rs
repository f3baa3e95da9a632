// Small formatting helpers shared by the components.

/// `"React Router"` -> `"react-router"`, used for `data-testid` attributes.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn format_percent(zoom: f64) -> String {
    format!("{}%", (zoom * 100.0).round() as i64)
}
