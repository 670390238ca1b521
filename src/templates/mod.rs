//! Built-in cyber theme templates using the Tera template engine
//!
//! Templates are embedded in the binary; a site needs no theme directory.

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::FooterConfig;

/// Template renderer with the embedded cyber theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("cyber/layout.html")),
            ("post.html", include_str!("cyber/post.html")),
            ("404.html", include_str!("cyber/404.html")),
            // Partials
            (
                "partials/backdrop.html",
                include_str!("cyber/partials/backdrop.html"),
            ),
            (
                "partials/footer.html",
                include_str!("cyber/partials/footer.html"),
            ),
            (
                "partials/style.css",
                include_str!("cyber/partials/style.css"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(template_name, context)
    }

    /// Render a full post document
    pub fn render_post(&self, view: &PostView) -> tera::Result<String> {
        self.render("post.html", &Context::from_serialize(view)?)
    }

    /// Render the not-found document
    pub fn render_not_found(&self, view: &NotFoundView) -> tera::Result<String> {
        self.render("404.html", &Context::from_serialize(view)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct PostView<'a> {
    pub language: &'a str,
    pub generator: String,
    /// Pre-rendered, escaped head tags
    pub head_html: &'a str,
    /// Script-safe JSON-LD
    pub json_ld: &'a str,
    pub hero: &'a HeroData,
    pub body_html: &'a str,
    pub footer: &'a FooterConfig,
}

/// Display fields of the hero section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroData {
    pub title: String,
    pub excerpt: Option<String>,
    pub date: String,
    pub author: String,
    /// Comma-separated tags, empty when the post has none
    pub tag_line: String,
    pub image: String,
    pub image_alt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundView<'a> {
    pub language: &'a str,
    pub generator: String,
    pub site_name: &'a str,
    /// Site root, the blog directory has no index page
    pub home: &'a str,
    pub footer: &'a FooterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> HeroData {
        HeroData {
            title: "Edge <Caching>".to_string(),
            excerpt: None,
            date: "2024-01-01".to_string(),
            author: "Jose".to_string(),
            tag_line: "a, b".to_string(),
            image: "/og-jose-cyber.png".to_string(),
            image_alt: "Edge <Caching>".to_string(),
        }
    }

    #[test]
    fn test_templates_parse() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_render_post_escapes_text_but_not_html() {
        let renderer = TemplateRenderer::new().unwrap();
        let footer = FooterConfig::default();
        let hero = hero();
        let html = renderer
            .render_post(&PostView {
                language: "en",
                generator: String::new(),
                head_html: "<title>X</title>",
                json_ld: r#"{"@type":"BlogPosting"}"#,
                hero: &hero,
                body_html: "<p>Body</p>",
                footer: &footer,
            })
            .unwrap();

        assert!(html.contains("<title>X</title>"));
        assert!(html.contains(r#"<script type="application/ld+json">{"@type":"BlogPosting"}</script>"#));
        assert!(html.contains("Edge &lt;Caching&gt;"));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("<span>By Jose</span>"));
        assert!(html.contains("<span>a, b</span>"));
        assert!(!html.contains(r#"<p class="hero-excerpt">"#));
        assert!(html.contains("Secure. Fast. Future-Ready."));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let footer = FooterConfig::default();
        let html = renderer
            .render_not_found(&NotFoundView {
                language: "en",
                generator: String::new(),
                site_name: "Jose Cyber",
                home: "/",
                footer: &footer,
            })
            .unwrap();
        assert!(html.contains("<title>Not Found | Jose Cyber</title>"));
        assert!(html.contains("Back to home"));
    }
}
