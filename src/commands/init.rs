//! Initialize a new blog

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# cyberblog configuration

# Site
site_name: Jose Cyber
author: Jose
author_url: /about
language: en

# URL
url: https://jose-cyber-pro.vercel.app
blog_dir: blog

# Directory
source_dir: content/posts
public_dir: public
static_dir: static

# Writing
render_drafts: false

# SEO defaults
seo:
  default_description: Insights on performance, SEO, and futuristic web development.
  structured_description: A deep dive into performance, SEO, and futuristic web development strategies.
  default_image: /og-jose-cyber.png
  og_image_width: 1200
  og_image_height: 630
  default_tags: [Performance, Next.js, SEO, UX]
  twitter_creator: "@JoseCyber"
  logo: /logo.png
  modified_from_updated: false

footer:
  tagline: Jose Cyber — Secure. Fast. Future-Ready.
  copyright: © 2025 Jose. All rights reserved.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
excerpt: The first post on a fast, secure, future-ready blog.
tags:
  - Performance
  - SEO
---

Welcome! This post lives in `content/posts/hello-world.md`.

## Write a new post

```bash
$ cyberblog new "My New Post"
```

## Preview

```bash
$ cyberblog server
```

## Build

```bash
$ cyberblog generate
```
"#,
        today
    );

    fs::write(target_dir.join("content/posts/hello-world.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.seo.twitter_creator, "@JoseCyber");
        assert_eq!(blog.config.footer.tagline, "Jose Cyber — Secure. Fast. Future-Ready.");

        let renderer = blog.renderer().unwrap();
        assert_eq!(renderer.list_identifiers(), vec!["hello-world"]);
        let meta = renderer.resolve_metadata("hello-world").unwrap();
        assert_eq!(meta.title, "Hello World | Jose Cyber");
        assert_eq!(meta.tag_line(), "Performance, SEO");
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
