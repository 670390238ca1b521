//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate a `<meta name=..>` tag
///
/// # Examples
/// ```ignore
/// meta_name("description", "Hi") // -> <meta name="description" content="Hi">
/// ```
pub fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        html_escape(name),
        html_escape(content)
    )
}

/// Generate a `<meta property=..>` tag, as used by Open Graph
pub fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        html_escape(property),
        html_escape(content)
    )
}

/// Generate a canonical link tag
pub fn canonical_link(url: &str) -> String {
    format!(r#"<link rel="canonical" href="{}">"#, html_escape(url))
}

/// Make serialized JSON safe to embed inside a `<script>` element
pub fn script_safe_json(json: &str) -> String {
    // `<` only ever appears inside JSON strings, where \u003c is equivalent
    json.replace('<', "\\u003c")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    meta_name(
        "generator",
        &format!("cyberblog {}", env!("CARGO_PKG_VERSION")),
    )
}
