//! Generator module - writes static HTML files using the built-in templates

use anyhow::{Context as _, Result};
use chrono::Datelike;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::Post;
use crate::templates::{ConfigData, NavPost, PaginationData, PostData, TemplateRenderer};
use crate::Blog;

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site from posts sorted newest first
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;
        self.remove_stale_pages()?;

        self.copy_static_assets()?;

        let config_data = ConfigData::from(&self.blog.config);
        // Footer year follows the newest post so identical input gives identical output
        let copyright_year = posts.first().map(|p| p.date.year());

        self.generate_index_pages(posts, &config_data, copyright_year)?;
        self.generate_post_pages(posts, &config_data, copyright_year)?;

        Ok(())
    }

    /// Create a base context with common variables
    fn create_base_context(
        &self,
        config_data: &ConfigData,
        copyright_year: Option<i32>,
    ) -> Context {
        let mut context = Context::new();
        context.insert("config", config_data);
        if let Some(year) = copyright_year {
            context.insert("copyright_year", &year);
        }
        context
    }

    /// Drop generated post and pagination pages so deleted posts leave nothing behind
    fn remove_stale_pages(&self) -> Result<()> {
        for dir in ["posts", "page"] {
            let path = self.blog.public_dir.join(dir);
            if path.is_dir() {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove {:?}", path))?;
                tracing::debug!("Removed previous output {:?}", path);
            }
        }
        Ok(())
    }

    /// Generate index pages with pagination
    fn generate_index_pages(
        &self,
        posts: &[Post],
        config_data: &ConfigData,
        copyright_year: Option<i32>,
    ) -> Result<()> {
        let root = &self.blog.config.root;
        let per_page = match self.blog.config.per_page {
            0 => posts.len().max(1),
            n => n,
        };
        // An empty blog still gets a front page
        let total_pages = posts.len().div_ceil(per_page).max(1);

        for page_num in 1..=total_pages {
            let start = ((page_num - 1) * per_page).min(posts.len());
            let end = (start + per_page).min(posts.len());
            let page_posts: Vec<PostData> = posts[start..end]
                .iter()
                .map(|p| PostData::new(p, root))
                .collect();

            let pagination = PaginationData {
                per_page,
                total: total_pages,
                current: page_num,
                current_url: page_url(root, page_num),
                prev_link: if page_num > 1 {
                    page_url(root, page_num - 1)
                } else {
                    String::new()
                },
                next_link: if page_num < total_pages {
                    page_url(root, page_num + 1)
                } else {
                    String::new()
                },
            };

            let mut context = self.create_base_context(config_data, copyright_year);
            context.insert("page_posts", &page_posts);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("index.html", &context)?;

            let output_path = if page_num == 1 {
                self.blog.public_dir.join("index.html")
            } else {
                self.blog
                    .public_dir
                    .join(format!("page/{}/index.html", page_num))
            };
            write_output(&output_path, &html)?;
        }

        tracing::info!("Generated {} index page(s)", total_pages);
        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(
        &self,
        posts: &[Post],
        config_data: &ConfigData,
        copyright_year: Option<i32>,
    ) -> Result<()> {
        let root = &self.blog.config.root;

        for post in posts {
            let nav = |p: &Post| NavPost {
                title: p.title.clone(),
                path: crate::templates::post_path(root, &p.slug),
            };

            let mut context = self.create_base_context(config_data, copyright_year);
            context.insert("post", &PostData::new(post, root));
            if let Some(newer) = post.prev(posts) {
                context.insert("prev_post", &nav(newer));
            }
            if let Some(older) = post.next(posts) {
                context.insert("next_post", &nav(older));
            }

            let html = self.renderer.render("post.html", &context)?;

            let output_path = self
                .blog
                .public_dir
                .join("posts")
                .join(&post.slug)
                .join("index.html");
            write_output(&output_path, &html)?;
        }

        tracing::info!("Generated {} post page(s)", posts.len());
        Ok(())
    }

    /// Copy the static directory verbatim into the output
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static file(s)", copied);
        Ok(())
    }
}

/// Site-relative URL of an index page
fn page_url(root: &str, page_num: usize) -> String {
    let root = root.trim_end_matches('/');
    if page_num == 1 {
        format!("{}/", root)
    } else {
        format!("{}/page/{}/", root, page_num)
    }
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}
