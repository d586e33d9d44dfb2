//! Shared helpers for integration tests.
//!
//! Builds throwaway blog directories with posts and an optional config.

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates an empty site directory with a `posts/` folder.
pub fn create_test_site() -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::create_dir(dir.path().join("posts"))?;
    Ok(dir)
}

/// Writes a post with YAML front-matter into the site's `posts/` folder.
pub fn write_post(site: &Path, slug: &str, title: &str, date: &str, body: &str) -> Result<()> {
    let content = format!("---\ntitle: {}\ndate: {}\n---\n\n{}", title, date, body);
    fs::write(site.join("posts").join(format!("{}.md", slug)), content)?;
    Ok(())
}

/// Writes `_config.yml` into the site directory.
pub fn write_config(site: &Path, yaml: &str) -> Result<()> {
    fs::write(site.join("_config.yml"), yaml)?;
    Ok(())
}
