//! Post model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A blog post as read from the content directory.
///
/// Posts are never mutated after loading; every derived value is computed
/// from a shared reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// URL identifier (file stem)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short summary shown under the title
    pub excerpt: Option<String>,

    /// SEO title override
    pub meta_title: Option<String>,

    /// SEO description override
    pub meta_description: Option<String>,

    /// Publication date, displayed verbatim
    pub date: String,

    /// Last updated date, displayed verbatim
    pub updated: Option<String>,

    /// Post tags (`None` when the front-matter has no tag list)
    pub tags: Option<Vec<String>>,

    /// Cover image path or URL
    pub featured_image: Option<String>,

    /// Raw markdown body
    pub content: String,

    /// Whether the post is a draft
    pub draft: bool,

    /// Full source file path
    #[serde(skip)]
    pub full_source: PathBuf,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// Tags joined for display, empty when the post has none
    pub fn tag_line(&self) -> String {
        self.tags.as_deref().unwrap_or_default().join(", ")
    }

    /// Interpret `date` for ordering. Display always uses the raw string.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }
}

/// Parse a date string in various ISO-like formats
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}
