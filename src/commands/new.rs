//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::filename_from_slug;
use crate::Blog;

/// Scaffold a post file with front-matter and return its path
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) {
        anyhow::bail!("Invalid slug {:?} for title {:?}", slug, title);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    let file_path = blog.posts_dir.join(filename_from_slug(&slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    // Quote the title so YAML-significant characters survive
    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_is_loadable() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());

        let path = create_post(&blog, "Hello: \"World\"", None).unwrap();
        assert_eq!(path, blog.posts_dir.join("hello-world.md"));

        let post = blog.posts().get_post("hello-world").unwrap();
        assert_eq!(post.title, "Hello: \"World\"");
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());

        create_post(&blog, "First", Some("same")).unwrap();
        assert!(create_post(&blog, "Second", Some("same")).is_err());
    }
}
