//! Helper functions for building head tags and URLs

mod html;
mod url;

pub use html::*;
pub use url::*;
