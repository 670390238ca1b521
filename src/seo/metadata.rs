//! Document head metadata: title, description, canonical URL, Open Graph and Twitter card

use serde::Serialize;

use super::first_non_empty;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{canonical_link, html_escape, meta_name, meta_property, post_url};

/// Resolved head metadata for a post page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    /// Social preview image (path or URL as written)
    pub image: String,
    /// Post tags, or the site's default set when the post has none
    pub tags: Vec<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub published_time: String,
    pub authors: Vec<String>,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub creator: String,
}

impl PageMetadata {
    /// Derive head metadata from a post
    pub fn resolve(post: &Post, config: &SiteConfig) -> Self {
        let seo = &config.seo;

        let title = first_non_empty([post.meta_title.as_deref()])
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} | {}", post.title, config.site_name));
        let description = first_non_empty([
            post.meta_description.as_deref(),
            post.excerpt.as_deref(),
            Some(seo.default_description.as_str()),
        ])
        .unwrap_or_default()
        .to_string();
        let canonical_url = post_url(config, &post.slug);
        let image = social_image(post, config).to_string();
        let tags = post
            .tags
            .clone()
            .unwrap_or_else(|| seo.default_tags.clone());

        let open_graph = OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical_url.clone(),
            kind: "article".to_string(),
            published_time: post.date.clone(),
            authors: vec![config.author.clone()],
            images: vec![OgImage {
                url: image.clone(),
                width: seo.og_image_width,
                height: seo.og_image_height,
                alt: post.title.clone(),
            }],
        };

        let twitter = TwitterCard {
            card: "summary_large_image".to_string(),
            title: title.clone(),
            description: description.clone(),
            images: vec![image.clone()],
            creator: seo.twitter_creator.clone(),
        };

        Self {
            title,
            description,
            canonical_url,
            image,
            tags,
            open_graph,
            twitter,
        }
    }

    /// Tags joined for display and the keywords meta tag
    pub fn tag_line(&self) -> String {
        self.tags.join(", ")
    }

    /// Render the head tags, one per line
    pub fn head_html(&self) -> String {
        let og = &self.open_graph;
        let tw = &self.twitter;

        let mut tags = vec![
            format!("<title>{}</title>", html_escape(&self.title)),
            meta_name("description", &self.description),
            canonical_link(&self.canonical_url),
        ];
        if !self.tags.is_empty() {
            tags.push(meta_name("keywords", &self.tag_line()));
        }

        tags.push(meta_property("og:title", &og.title));
        tags.push(meta_property("og:description", &og.description));
        tags.push(meta_property("og:url", &og.url));
        tags.push(meta_property("og:type", &og.kind));
        if !og.published_time.is_empty() {
            tags.push(meta_property("article:published_time", &og.published_time));
        }
        for author in &og.authors {
            tags.push(meta_property("article:author", author));
        }
        for image in &og.images {
            tags.push(meta_property("og:image", &image.url));
            tags.push(meta_property("og:image:width", &image.width.to_string()));
            tags.push(meta_property("og:image:height", &image.height.to_string()));
            tags.push(meta_property("og:image:alt", &image.alt));
        }

        tags.push(meta_name("twitter:card", &tw.card));
        tags.push(meta_name("twitter:title", &tw.title));
        tags.push(meta_name("twitter:description", &tw.description));
        for image in &tw.images {
            tags.push(meta_name("twitter:image", image));
        }
        tags.push(meta_name("twitter:creator", &tw.creator));

        tags.join("\n")
    }
}

/// Featured image, or the site default when the post has none
pub(crate) fn social_image<'a>(post: &'a Post, config: &'a SiteConfig) -> &'a str {
    first_non_empty([post.featured_image.as_deref()]).unwrap_or(config.seo.default_image.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let mut post = Post::new("x", "T", "2024-01-01");
        post.tags = Some(vec!["a".to_string(), "b".to_string()]);
        post
    }

    #[test]
    fn test_defaults_for_bare_post() {
        let config = SiteConfig::default();
        let meta = PageMetadata::resolve(&sample_post(), &config);

        assert_eq!(meta.title, "T | Jose Cyber");
        assert_eq!(
            meta.description,
            "Insights on performance, SEO, and futuristic web development."
        );
        assert_eq!(meta.image, "/og-jose-cyber.png");
        assert_eq!(meta.tag_line(), "a, b");
        assert_eq!(meta.canonical_url, "https://jose-cyber-pro.vercel.app/blog/x");
    }

    #[test]
    fn test_meta_title_override() {
        let config = SiteConfig::default();
        let mut post = sample_post();
        post.meta_title = Some("Custom Title".to_string());
        assert_eq!(PageMetadata::resolve(&post, &config).title, "Custom Title");

        // Empty overrides fall through
        post.meta_title = Some(String::new());
        assert_eq!(PageMetadata::resolve(&post, &config).title, "T | Jose Cyber");

        // Whitespace is still a value
        post.meta_title = Some("  ".to_string());
        assert_eq!(PageMetadata::resolve(&post, &config).title, "  ");
    }

    #[test]
    fn test_description_precedence() {
        let config = SiteConfig::default();

        let mut excerpt_only = sample_post();
        excerpt_only.excerpt = Some("From excerpt".to_string());
        assert_eq!(
            PageMetadata::resolve(&excerpt_only, &config).description,
            "From excerpt"
        );

        let mut both = excerpt_only.clone();
        both.meta_description = Some("From meta".to_string());
        assert_eq!(PageMetadata::resolve(&both, &config).description, "From meta");

        let mut empty_meta = excerpt_only;
        empty_meta.meta_description = Some(String::new());
        assert_eq!(
            PageMetadata::resolve(&empty_meta, &config).description,
            "From excerpt"
        );
    }

    #[test]
    fn test_featured_image_used_everywhere() {
        let config = SiteConfig::default();
        let mut post = sample_post();
        post.featured_image = Some("/custom.png".to_string());

        let meta = PageMetadata::resolve(&post, &config);
        assert_eq!(meta.image, "/custom.png");
        assert_eq!(meta.open_graph.images[0].url, "/custom.png");
        assert_eq!(meta.twitter.images, vec!["/custom.png"]);
    }

    #[test]
    fn test_default_tags_when_absent() {
        let config = SiteConfig::default();
        let mut post = sample_post();
        post.tags = None;
        assert_eq!(
            PageMetadata::resolve(&post, &config).tags,
            vec!["Performance", "Next.js", "SEO", "UX"]
        );

        post.tags = Some(Vec::new());
        assert!(PageMetadata::resolve(&post, &config).tags.is_empty());
    }

    #[test]
    fn test_open_graph_and_twitter_fields() {
        let config = SiteConfig::default();
        let meta = PageMetadata::resolve(&sample_post(), &config);

        let og = &meta.open_graph;
        assert_eq!(og.kind, "article");
        assert_eq!(og.published_time, "2024-01-01");
        assert_eq!(og.authors, vec!["Jose"]);
        assert_eq!(og.url, meta.canonical_url);
        assert_eq!(
            og.images[0],
            OgImage {
                url: "/og-jose-cyber.png".to_string(),
                width: 1200,
                height: 630,
                alt: "T".to_string(),
            }
        );

        assert_eq!(meta.twitter.card, "summary_large_image");
        assert_eq!(meta.twitter.creator, "@JoseCyber");
        assert_eq!(meta.twitter.title, meta.title);
    }

    #[test]
    fn test_head_html() {
        let config = SiteConfig::default();
        let mut post = sample_post();
        post.title = "Fast & Secure".to_string();
        let head = PageMetadata::resolve(&post, &config).head_html();

        assert!(head.contains("<title>Fast &amp; Secure | Jose Cyber</title>"));
        assert!(head.contains(
            r#"<link rel="canonical" href="https://jose-cyber-pro.vercel.app/blog/x">"#
        ));
        assert!(head.contains(r#"<meta property="og:type" content="article">"#));
        assert!(head.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(head.contains(r#"<meta name="keywords" content="a, b">"#));
    }
}
