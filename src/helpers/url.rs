//! URL helper functions

use crate::config::SiteConfig;

/// Whether a path already carries a scheme or is protocol-relative
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Generate a full URL including the site origin
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about") // -> "https://example.com/about"
/// full_url_for(&config, "https://cdn.example.com/a.png") // unchanged
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    format!("{}/{}", config.origin(), path.trim_start_matches('/'))
}

/// Site-relative path of a post
///
/// # Examples
/// ```ignore
/// post_path(&config, "hello") // -> "/blog/hello"
/// ```
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    let blog_dir = config.blog_dir.trim_matches('/');
    if blog_dir.is_empty() {
        format!("/{}", slug)
    } else {
        format!("/{}/{}", blog_dir, slug)
    }
}

/// Canonical URL of a post
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    format!("{}{}", config.origin(), post_path(config, slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_for() {
        let config = SiteConfig::default();
        assert_eq!(
            full_url_for(&config, "/about"),
            "https://jose-cyber-pro.vercel.app/about"
        );
        assert_eq!(
            full_url_for(&config, "logo.png"),
            "https://jose-cyber-pro.vercel.app/logo.png"
        );
        assert_eq!(
            full_url_for(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_post_url() {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        assert_eq!(post_path(&config, "x"), "/blog/x");
        assert_eq!(post_url(&config, "x"), "https://example.com/blog/x");

        config.blog_dir = String::new();
        assert_eq!(post_url(&config, "x"), "https://example.com/x");
    }
}
