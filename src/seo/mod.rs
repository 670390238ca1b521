//! SEO metadata derived from a post and the site constants
//!
//! Everything here is a pure function of a [`Post`](crate::content::Post)
//! and a [`SiteConfig`](crate::config::SiteConfig).

mod fallback;
mod metadata;
mod structured;

pub use fallback::first_non_empty;
pub use metadata::{OgImage, OpenGraph, PageMetadata, TwitterCard};
pub use structured::{BlogPosting, ImageObject, Organization, Person};
