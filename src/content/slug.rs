//! Slug <-> filename mapping

/// Extension of post source files
pub const POST_EXTENSION: &str = "md";

/// Derive a slug from a post filename by stripping the extension.
///
/// Returns `None` when the name does not carry the post extension.
pub fn slug_from_filename(filename: &str) -> Option<&str> {
    filename
        .strip_suffix(POST_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .filter(|s| !s.is_empty())
}

/// Build the filename backing a slug
pub fn filename_from_slug(slug: &str) -> String {
    format!("{}.{}", slug, POST_EXTENSION)
}

/// A slug must name a single, non-hidden file inside the posts directory
pub(crate) fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_from_filename() {
        for name in ["hello-world.md", "2024-08-11-notes.md", "a.md", "with.dots.md"] {
            let slug = slug_from_filename(name).unwrap();
            assert_eq!(filename_from_slug(slug), name);
        }
    }

    #[test]
    fn test_round_trip_from_slug() {
        for slug in ["hello-world", "a", "rust-2024"] {
            let name = filename_from_slug(slug);
            assert_eq!(slug_from_filename(&name), Some(slug));
        }
    }

    #[test]
    fn test_non_post_filenames() {
        assert_eq!(slug_from_filename("notes.txt"), None);
        assert_eq!(slug_from_filename(".md"), None);
        assert_eq!(slug_from_filename("readme"), None);
        assert_eq!(slug_from_filename("draftmd"), None);
    }

    #[test]
    fn test_plain_slug() {
        assert!(is_plain_slug("hello-world"));
        assert!(!is_plain_slug("../secret"));
        assert!(!is_plain_slug("nested/post"));
        assert!(!is_plain_slug(""));
        assert!(!is_plain_slug(".."));
        assert!(!is_plain_slug(".draft"));
    }
}
