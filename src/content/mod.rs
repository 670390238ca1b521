//! Content module - posts, front-matter and body rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, PostIndex, PostSource};
pub use markdown::{BodyRenderer, MarkdownRenderer};
pub use post::Post;
