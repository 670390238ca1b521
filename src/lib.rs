//! cyberblog: static blog post pages with SEO metadata
//!
//! Posts are Markdown files with YAML front-matter. Each one becomes a page
//! carrying head metadata (Open Graph, Twitter card), a JSON-LD
//! `BlogPosting` block, and the rendered body inside the cyber theme.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod seo;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLoader, MarkdownRenderer, PostIndex};
use render::PostRenderer;

/// Config file name at the site root
pub const CONFIG_FILE: &str = "_config.yml";

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Post source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static asset directory copied as-is
    pub static_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
            static_dir,
        })
    }

    /// Load the posts from the source directory, newest first
    pub fn load_posts(&self) -> Result<PostIndex> {
        ContentLoader::new(&self.source_dir, self.config.render_drafts).load()
    }

    /// Load the posts and build a renderer over them
    pub fn renderer(&self) -> Result<PostRenderer> {
        Ok(PostRenderer::new(
            self.config.clone(),
            self.load_posts()?,
            MarkdownRenderer::new(),
        )?)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
