//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub site_name: String,
    pub author: String,
    /// Author profile path, joined to `url` for structured data
    pub author_url: String,
    pub language: String,

    // URL
    /// Site origin without trailing slash, e.g. `https://example.com`
    pub url: String,
    /// Path segment posts live under
    pub blog_dir: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Writing
    pub render_drafts: bool,

    // Meta
    #[serde(default)]
    pub seo: SeoConfig,

    #[serde(default)]
    pub footer: FooterConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Jose Cyber".to_string(),
            author: "Jose".to_string(),
            author_url: "/about".to_string(),
            language: "en".to_string(),

            url: "https://jose-cyber-pro.vercel.app".to_string(),
            blog_dir: "blog".to_string(),

            source_dir: "content/posts".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            render_drafts: false,

            seo: SeoConfig::default(),
            footer: FooterConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Site origin with any trailing slash removed
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// SEO defaults used when a post leaves a field empty
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Fallback for the head and social descriptions
    pub default_description: String,
    /// Fallback for the JSON-LD description
    pub structured_description: String,
    /// Social preview image when the post has no featured image
    pub default_image: String,
    pub og_image_width: u32,
    pub og_image_height: u32,
    /// Keywords when the post has no tags
    pub default_tags: Vec<String>,
    pub twitter_creator: String,
    pub logo: String,
    /// Use the post's `updated` field for `dateModified` when present
    pub modified_from_updated: bool,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            default_description: "Insights on performance, SEO, and futuristic web development."
                .to_string(),
            structured_description:
                "A deep dive into performance, SEO, and futuristic web development strategies."
                    .to_string(),
            default_image: "/og-jose-cyber.png".to_string(),
            og_image_width: 1200,
            og_image_height: 630,
            default_tags: ["Performance", "Next.js", "SEO", "UX"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            twitter_creator: "@JoseCyber".to_string(),
            logo: "/logo.png".to_string(),
            modified_from_updated: false,
        }
    }
}

/// Static footer text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub tagline: String,
    pub copyright: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            tagline: "Jose Cyber — Secure. Fast. Future-Ready.".to_string(),
            copyright: "© 2025 Jose. All rights reserved.".to_string(),
        }
    }
}
