//! Front-matter parsing

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings.
///
/// `null` stays `None` so an absent tag list is distinguishable from an empty one.
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Option<Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value]))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(Some(vec))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    pub excerpt: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub draft: bool,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing fence, the whole file is body
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading thematic break followed by prose is not front-matter
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return Ok((FrontMatter::default(), content));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        // JSON front-matter fenced by ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let json_content = &rest[..end_pos];
                let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

                return Ok((fm, remaining));
            }
        }

        // A bare JSON object at the start, the body follows it
        if content.starts_with('{') {
            let mut stream =
                serde_json::Deserializer::from_str(content).into_iter::<FrontMatter>();
            let fm = match stream.next() {
                Some(Ok(fm)) => fm,
                Some(Err(e)) => {
                    return Err(anyhow!("Failed to parse JSON front-matter: {}", e));
                }
                None => return Err(anyhow!("Invalid JSON front-matter")),
            };
            let remaining = content[stream.byte_offset()..].trim_start_matches(['\n', '\r']);
            return Ok((fm, remaining));
        }

        Err(anyhow!("Invalid JSON front-matter"))
    }
}

/// Whether a line has the `key:` shape of a YAML mapping entry
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Core Web Vitals in 2025
date: 2025-03-14
excerpt: What actually moves LCP.
metaTitle: Core Web Vitals Guide
metaDescription: A practical guide to LCP, INP and CLS.
featuredImage: /images/cwv.png
tags:
  - Performance
  - SEO
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Core Web Vitals in 2025"));
        assert_eq!(fm.date.as_deref(), Some("2025-03-14"));
        assert_eq!(fm.meta_title.as_deref(), Some("Core Web Vitals Guide"));
        assert_eq!(
            fm.meta_description.as_deref(),
            Some("A practical guide to LCP, INP and CLS.")
        );
        assert_eq!(fm.featured_image.as_deref(), Some("/images/cwv.png"));
        assert_eq!(
            fm.tags,
            Some(vec!["Performance".to_string(), "SEO".to_string()])
        );
        assert!(!fm.draft);
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "tags": ["a", "b"], "featuredImage": "/x.png"}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(fm.featured_image.as_deref(), Some("/x.png"));
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_parse_fenced_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\"}\n;;;\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Fenced"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_single_string_tag() {
        let content = "---\ntitle: One Tag\ntags: Notes\n---\nBody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, Some(vec!["Notes".to_string()]));
    }

    #[test]
    fn test_absent_and_null_tags_stay_none() {
        let (fm, _) = FrontMatter::parse("---\ntitle: No Tags\n---\nBody").unwrap();
        assert_eq!(fm.tags, None);

        let (fm, _) = FrontMatter::parse("---\ntitle: Null Tags\ntags:\n---\nBody").unwrap();
        assert_eq!(fm.tags, None);

        let (fm, _) = FrontMatter::parse("---\ntitle: Empty Tags\ntags: []\n---\nBody").unwrap();
        assert_eq!(fm.tags, Some(Vec::new()));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("# Just markdown").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, "# Just markdown");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_scalar_tags_become_single_tag() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Year\ntags: 2024\n---\nBody").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Year"));
        assert_eq!(fm.tags, Some(vec!["2024".to_string()]));

        let (fm, _) = FrontMatter::parse("---\ntitle: Flag\ntags: true\n---\n").unwrap();
        assert_eq!(fm.tags, Some(vec!["true".to_string()]));

        let (fm, _) = FrontMatter::parse("---\ntitle: V\ntags: 1.5\n---\n").unwrap();
        assert_eq!(fm.tags, Some(vec!["1.5".to_string()]));
    }

    #[test]
    fn test_bare_json_with_brace_in_string() {
        let (fm, remaining) = FrontMatter::parse("{\"title\": \"a } b\"}\nBody").unwrap();
        assert_eq!(fm.title.as_deref(), Some("a } b"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_bare_json_nested_braces_in_strings() {
        let content = "{\"title\": \"{x}\", \"excerpt\": \"}{\"}\n\n# Heading";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("{x}"));
        assert_eq!(fm.excerpt.as_deref(), Some("}{"));
        assert_eq!(remaining, "# Heading");
    }
}
