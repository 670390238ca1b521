//! Configuration module

mod site;

pub use site::FooterConfig;
pub use site::SeoConfig;
pub use site::SiteConfig;
