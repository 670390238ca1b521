//! Post renderer - turns a post identifier into a complete page
//!
//! A page is three independent views of the same [`Post`]: head metadata,
//! a JSON-LD `BlogPosting` block, and the visible hero + body markup.

use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{BodyRenderer, Post, PostSource};
use crate::helpers::meta_generator;
use crate::seo::{BlogPosting, PageMetadata};
use crate::templates::{HeroData, NotFoundView, PostView, TemplateRenderer};

/// Errors from rendering a post page
#[derive(Error, Debug)]
pub enum RenderError {
    /// No post exists for the identifier
    #[error("post not found: {0}")]
    NotFound(String),

    #[error("failed to render body of {slug}")]
    Body {
        slug: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("structured data error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::NotFound(_))
    }
}

/// Everything produced for one post
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub slug: String,
    pub metadata: PageMetadata,
    pub structured_data: BlogPosting,
    pub hero: HeroData,
    pub body_html: String,
    /// The complete HTML document
    pub html: String,
}

/// Renders post pages from a content source
pub struct PostRenderer {
    config: SiteConfig,
    source: Box<dyn PostSource>,
    body: Box<dyn BodyRenderer>,
    templates: TemplateRenderer,
}

impl PostRenderer {
    /// Create a renderer over a content source and body renderer
    pub fn new(
        config: SiteConfig,
        source: impl PostSource + 'static,
        body: impl BodyRenderer + 'static,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            config,
            source: Box::new(source),
            body: Box::new(body),
            templates: TemplateRenderer::new()?,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// All post identifiers, for static path generation
    pub fn list_identifiers(&self) -> Vec<String> {
        self.source.list_identifiers()
    }

    /// Head metadata for a post; `None` when the post does not exist
    pub fn resolve_metadata(&self, slug: &str) -> Option<PageMetadata> {
        self.source
            .get_post(slug)
            .map(|post| PageMetadata::resolve(post, &self.config))
    }

    /// Render a post page
    pub fn render_page(&self, slug: &str) -> Result<RenderedPage, RenderError> {
        let post = self
            .source
            .get_post(slug)
            .ok_or_else(|| RenderError::NotFound(slug.to_string()))?;

        let metadata = PageMetadata::resolve(post, &self.config);
        let structured_data = BlogPosting::from_post(post, &self.config);
        let hero = self.hero(post, &metadata);
        let body_html = self
            .body
            .render(&post.content)
            .map_err(|source| RenderError::Body {
                slug: slug.to_string(),
                source,
            })?;

        let head_html = metadata.head_html();
        let json_ld = structured_data.to_script_json()?;
        let html = self.templates.render_post(&PostView {
            language: &self.config.language,
            generator: meta_generator(),
            head_html: &head_html,
            json_ld: &json_ld,
            hero: &hero,
            body_html: &body_html,
            footer: &self.config.footer,
        })?;

        tracing::debug!("Rendered post {}", slug);

        Ok(RenderedPage {
            slug: post.slug.clone(),
            metadata,
            structured_data,
            hero,
            body_html,
            html,
        })
    }

    /// Render the document served for unknown paths
    pub fn render_not_found(&self) -> Result<String, RenderError> {
        let html = self.templates.render_not_found(&NotFoundView {
            language: &self.config.language,
            generator: meta_generator(),
            site_name: &self.config.site_name,
            home: "/",
            footer: &self.config.footer,
        })?;
        Ok(html)
    }

    fn hero(&self, post: &Post, metadata: &PageMetadata) -> HeroData {
        HeroData {
            title: post.title.clone(),
            excerpt: post
                .excerpt
                .clone()
                .filter(|e| !e.is_empty()),
            date: post.date.clone(),
            author: self.config.author.clone(),
            tag_line: post.tag_line(),
            image: metadata.image.clone(),
            image_alt: post.title.clone(),
        }
    }
}
