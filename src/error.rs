//! Error types for loading posts

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while enumerating, reading or rendering posts
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Posts directory not found: {path:?}")]
    DirectoryNotFound { path: PathBuf },

    #[error("No post for slug '{slug}' (expected {path:?})")]
    FileNotFound { slug: String, path: PathBuf },

    #[error("Invalid front-matter in '{slug}': {message}")]
    MetadataParse { slug: String, message: String },

    #[error("Failed to render '{slug}': {source}")]
    Render {
        slug: String,
        #[source]
        source: RenderError,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PostError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure reported by a markdown renderer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct RenderError(pub String);

pub type Result<T> = std::result::Result<T, PostError>;
