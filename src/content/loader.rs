//! Post repository - loads posts from the posts directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::FrontMatter;
use super::markdown::{MarkdownRender, MarkdownRenderer};
use super::post::{friendly_date, Post};
use super::slug::{filename_from_slug, is_plain_slug, slug_from_filename};
use crate::config::SiteConfig;
use crate::error::{PostError, Result};

/// Reads posts from a directory of markdown files
pub struct PostRepository<R = MarkdownRenderer> {
    posts_dir: PathBuf,
    renderer: R,
    date_format: String,
}

impl PostRepository<MarkdownRenderer> {
    /// Create a repository using the configured highlighter and date format
    pub fn new<P: Into<PathBuf>>(posts_dir: P, config: &SiteConfig) -> Self {
        Self::with_renderer(
            posts_dir,
            MarkdownRenderer::with_options(&config.highlight),
            &config.date_format,
        )
    }
}

impl<R: MarkdownRender> PostRepository<R> {
    /// Create a repository with a custom markdown renderer
    pub fn with_renderer<P: Into<PathBuf>>(posts_dir: P, renderer: R, date_format: &str) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer,
            date_format: date_format.to_string(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Path of the file backing a slug
    pub fn post_path(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(filename_from_slug(slug))
    }

    /// List the slugs of every post file, in file-name order
    pub fn list_slugs(&self) -> Result<Vec<String>> {
        if !self.posts_dir.is_dir() {
            return Err(PostError::DirectoryNotFound {
                path: self.posts_dir.clone(),
            });
        }

        let mut slugs = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.posts_dir.clone());
                PostError::io(path, e.into())
            })?;

            if !entry.file_type().is_file() {
                tracing::debug!("Skipping non-file entry {:?}", entry.path());
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
                continue;
            };

            if name.starts_with('.') {
                tracing::debug!("Skipping hidden file {:?}", entry.path());
                continue;
            }

            if let Some(slug) = slug_from_filename(name) {
                slugs.push(slug.to_string());
            }
        }

        Ok(slugs)
    }

    /// Load a single post by slug
    pub fn get_post(&self, slug: &str) -> Result<Post> {
        let path = self.post_path(slug);
        if !is_plain_slug(slug) {
            return Err(PostError::FileNotFound {
                slug: slug.to_string(),
                path,
            });
        }

        let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PostError::FileNotFound {
                slug: slug.to_string(),
                path: path.clone(),
            },
            _ => PostError::io(&path, e),
        })?;

        let metadata_error = |e: super::frontmatter::FrontMatterError| PostError::MetadataParse {
            slug: slug.to_string(),
            message: e.to_string(),
        };

        let (fm, body) = FrontMatter::parse(&raw).map_err(metadata_error)?;
        let title = fm.require_title().map_err(metadata_error)?.to_string();
        let date = fm.require_date().map_err(metadata_error)?;

        let render_error = |source| PostError::Render {
            slug: slug.to_string(),
            source,
        };

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let content_html = self.renderer.render(&full_md).map_err(render_error)?;
        let excerpt_html = excerpt_md
            .map(|e| self.renderer.render(&e))
            .transpose()
            .map_err(render_error)?;

        tracing::debug!("Loaded post '{}' from {:?}", slug, path);

        Ok(Post {
            slug: slug.to_string(),
            title,
            friendly_date: friendly_date(&date, &self.date_format),
            date,
            content: body.to_string(),
            content_html,
            excerpt_html,
            source: path,
            extra: fm.extra,
        })
    }

    /// Load every post, newest first.
    ///
    /// Posts sharing a date keep their file-name order. Any failing post
    /// fails the whole call.
    pub fn get_all_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self
            .list_slugs()?
            .iter()
            .map(|slug| self.get_post(slug))
            .collect::<Result<Vec<_>>>()?;

        // sort_by is stable
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.posts_dir);
        Ok(posts)
    }
}
