//! List posts

use anyhow::Result;

use crate::content::PostIndex;
use crate::Blog;

/// Print every post, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.load_posts()?;

    println!("Posts ({}):", posts.len());
    for line in listing(&posts) {
        println!("{}", line);
    }

    Ok(())
}

/// One `date - title [slug]` line per post, in index order
fn listing(posts: &PostIndex) -> Vec<String> {
    posts
        .posts()
        .map(|post| format!("  {} - {} [{}]", post.date, post.title, post.slug))
        .collect()
}
