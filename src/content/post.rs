//! Post model

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default chrono format of a post's friendly date
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A blog post, built once per build and never mutated afterwards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Slug (file name without extension)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDateTime,

    /// Display form of `date`
    pub friendly_date: String,

    /// Raw markdown body, without front-matter
    pub content: String,

    /// Rendered HTML body
    pub content_html: String,

    /// Rendered excerpt (before <!-- more -->)
    pub excerpt_html: Option<String>,

    /// Source file path
    pub source: PathBuf,

    /// Custom front-matter fields
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Post {
    /// Get the newer neighbour in a list sorted newest first
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        pos.checked_sub(1).map(|i| &posts[i])
    }

    /// Get the older neighbour in a list sorted newest first
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}

/// Render a post date for display
pub fn friendly_date(date: &NaiveDateTime, format: &str) -> String {
    date.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str, day: u32) -> Post {
        let date = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Post {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date,
            friendly_date: friendly_date(&date, DEFAULT_DATE_FORMAT),
            content: String::new(),
            content_html: String::new(),
            excerpt_html: None,
            source: PathBuf::from(format!("{}.md", slug)),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_friendly_date() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 11)
            .unwrap()
            .and_hms_opt(18, 45, 0)
            .unwrap();
        assert_eq!(friendly_date(&date, DEFAULT_DATE_FORMAT), "2024-08-11");
        assert_eq!(friendly_date(&date, "%B %d, %Y"), "August 11, 2024");
        assert_eq!(
            friendly_date(&date, DEFAULT_DATE_FORMAT),
            friendly_date(&date, DEFAULT_DATE_FORMAT)
        );
    }

    #[test]
    fn test_prev_next() {
        let posts = vec![post("c", 3), post("b", 2), post("a", 1)];
        assert_eq!(posts[1].prev(&posts).map(|p| p.slug.as_str()), Some("c"));
        assert_eq!(posts[1].next(&posts).map(|p| p.slug.as_str()), Some("a"));
        assert!(posts[0].prev(&posts).is_none());
        assert!(posts[2].next(&posts).is_none());
    }
}
