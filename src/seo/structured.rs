//! schema.org `BlogPosting` structured data (JSON-LD)

use serde::Serialize;

use super::first_non_empty;
use super::metadata::social_image;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{full_url_for, post_url, script_safe_json};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPosting {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub headline: String,
    /// Absolute image URLs
    pub image: Vec<String>,
    pub author: Person,
    pub publisher: Organization,
    pub url: String,
    pub date_published: String,
    pub date_modified: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: String,
    pub url: String,
}

impl BlogPosting {
    pub fn from_post(post: &Post, config: &SiteConfig) -> Self {
        let seo = &config.seo;

        let date_modified = if seo.modified_from_updated {
            first_non_empty([post.updated.as_deref(), Some(post.date.as_str())])
                .unwrap_or_default()
                .to_string()
        } else {
            post.date.clone()
        };

        let description = first_non_empty([
            post.meta_description.as_deref(),
            post.excerpt.as_deref(),
            Some(seo.structured_description.as_str()),
        ])
        .unwrap_or_default()
        .to_string();

        Self {
            context: "https://schema.org".to_string(),
            kind: "BlogPosting".to_string(),
            headline: post.title.clone(),
            image: vec![full_url_for(config, social_image(post, config))],
            author: Person {
                kind: "Person".to_string(),
                name: config.author.clone(),
                url: full_url_for(config, &config.author_url),
            },
            publisher: Organization {
                kind: "Organization".to_string(),
                name: config.site_name.clone(),
                logo: ImageObject {
                    kind: "ImageObject".to_string(),
                    url: full_url_for(config, &seo.logo),
                },
            },
            url: post_url(config, &post.slug),
            date_published: post.date.clone(),
            date_modified,
            description,
            keywords: post
                .tags
                .clone()
                .unwrap_or_else(|| seo.default_tags.clone()),
        }
    }

    /// Serialize for embedding in a `<script type="application/ld+json">` element
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self).map(|json| script_safe_json(&json))
    }
}
