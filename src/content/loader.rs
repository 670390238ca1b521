//! Content loader - loads posts from the source directory

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};

/// Lookup of posts by identifier
pub trait PostSource: Send + Sync {
    /// All known identifiers, in listing order
    fn list_identifiers(&self) -> Vec<String>;

    /// The post for an identifier, if one exists
    fn get_post(&self, slug: &str) -> Option<&Post>;
}

/// An in-memory set of posts keyed by slug
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: IndexMap<String, Post>,
}

impl PostIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post, replacing any earlier post with the same slug
    pub fn insert(&mut self, post: Post) -> Option<Post> {
        self.posts.insert(post.slug.clone(), post)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    /// Order newest first; posts with unparseable dates go last
    pub fn sort_by_date(&mut self) {
        self.posts
            .sort_by(|_, a, _, b| Reverse(a.parsed_date()).cmp(&Reverse(b.parsed_date())));
    }
}

impl FromIterator<Post> for PostIndex {
    fn from_iter<I: IntoIterator<Item = Post>>(iter: I) -> Self {
        let mut index = PostIndex::new();
        for post in iter {
            index.insert(post);
        }
        index
    }
}

impl PostSource for PostIndex {
    fn list_identifiers(&self) -> Vec<String> {
        self.posts.keys().cloned().collect()
    }

    fn get_post(&self, slug: &str) -> Option<&Post> {
        self.posts.get(slug)
    }
}

/// Loads posts from the source directory
pub struct ContentLoader {
    source_dir: PathBuf,
    render_drafts: bool,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(source_dir: impl Into<PathBuf>, render_drafts: bool) -> Self {
        Self {
            source_dir: source_dir.into(),
            render_drafts,
        }
    }

    /// Load every post under the source directory, newest first
    pub fn load(&self) -> Result<PostIndex> {
        let mut index = PostIndex::new();
        if !self.source_dir.exists() {
            tracing::warn!("Source directory {:?} does not exist", self.source_dir);
            return Ok(index);
        }

        for entry in WalkDir::new(&self.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(Some(post)) => {
                    if post.draft && !self.render_drafts {
                        tracing::debug!("Skipping draft {:?}", path);
                        continue;
                    }
                    if let Some(previous) = index.insert(post) {
                        tracing::warn!(
                            "Duplicate slug {:?}: {:?} replaced by {:?}",
                            previous.slug,
                            previous.full_source,
                            path
                        );
                    }
                }
                Ok(None) => {
                    tracing::warn!("Skipping {:?}: front-matter has no title", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                }
            }
        }

        index.sort_by_date();
        tracing::debug!("Loaded {} posts from {:?}", index.len(), self.source_dir);

        Ok(index)
    }

    /// Load a single post. A file without a title is not a post.
    fn load_post(&self, path: &Path) -> Result<Option<Post>> {
        let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        let Some(title) = fm.title.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        Ok(Some(Post {
            slug,
            title,
            excerpt: fm.excerpt,
            meta_title: fm.meta_title,
            meta_description: fm.meta_description,
            date: fm.date.unwrap_or_default(),
            updated: fm.updated,
            tags: fm.tags,
            featured_image: fm.featured_image,
            content: body.to_string(),
            draft: fm.draft,
            full_source: path.to_path_buf(),
        }))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown" || e == "mdx")
        .unwrap_or(false)
}
