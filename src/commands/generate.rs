//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::generator::{GenerateReport, Generator};
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    generate(blog).map(|_| ())
}

/// Generate and report what was written
pub fn generate(blog: &Blog) -> Result<GenerateReport> {
    let start = Instant::now();

    let renderer = blog.renderer()?;
    tracing::info!("Loaded {} posts", renderer.list_identifiers().len());

    let report = Generator::new(&renderer, &blog.public_dir, &blog.static_dir).generate()?;

    tracing::info!(
        "Generated {} posts and copied {} assets in {:.2}s",
        report.posts,
        report.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::init_site;

    #[test]
    fn test_generate_initialized_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let report = generate(&blog).unwrap();
        assert_eq!(report.posts, 1);

        let html =
            std::fs::read_to_string(blog.public_dir.join("blog/hello-world/index.html")).unwrap();
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(r#""@type":"BlogPosting""#));
        assert!(html.contains("<span>Performance, SEO</span>"));
    }
}
