//! Content module - post loading, front-matter and markdown processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod slug;

pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use loader::PostRepository;
pub use markdown::{MarkdownRender, MarkdownRenderer, EXCERPT_MARKER};
pub use post::{friendly_date, Post, DEFAULT_DATE_FORMAT};
pub use slug::{filename_from_slug, slug_from_filename};
