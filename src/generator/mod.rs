//! Generator module - writes every post page to the public directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::render::PostRenderer;

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub posts: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator<'a> {
    renderer: &'a PostRenderer,
    public_dir: PathBuf,
    static_dir: PathBuf,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(
        renderer: &'a PostRenderer,
        public_dir: impl Into<PathBuf>,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            renderer,
            public_dir: public_dir.into(),
            static_dir: static_dir.into(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.public_dir)
            .with_context(|| format!("Failed to create dir {:?}", self.public_dir))?;

        let assets = self.copy_static_assets()?;
        let posts = self.generate_post_pages()?;
        self.generate_not_found_page()?;

        Ok(GenerateReport { posts, assets })
    }

    /// Write `<blog_dir>/<slug>/index.html` for every post
    fn generate_post_pages(&self) -> Result<usize> {
        let blog_dir = self.renderer.config().blog_dir.trim_matches('/').to_string();
        let identifiers = self.renderer.list_identifiers();

        for slug in &identifiers {
            let page = self
                .renderer
                .render_page(slug)
                .with_context(|| format!("Failed to render post {:?}", slug))?;

            let output_path = self.public_dir.join(&blog_dir).join(slug).join("index.html");
            write_file(&output_path, &page.html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(identifiers.len())
    }

    fn generate_not_found_page(&self) -> Result<()> {
        let html = self.renderer.render_not_found()?;
        write_file(&self.public_dir.join("404.html"), &html)
    }

    /// Copy the static directory into the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        if !self.static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(&self.static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.static_dir).unwrap_or(path);
            let dest = self.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create dir {:?}", parent))?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}
