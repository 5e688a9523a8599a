//! Content loader - reads a page's source file from the content directory

use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::{FrontMatter, PageContent};
use crate::manifest::PageDescriptor;

/// Errors raised while loading a content file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Content file not found: {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Loads page sources from the content directory.
///
/// Every call reads the file again; nothing is cached.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    /// Create a loader rooted at `content_dir`
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Full path of a descriptor's source file.
    ///
    /// `Manifest::new` guarantees `file` stays inside the content directory.
    pub fn path_for(&self, descriptor: &PageDescriptor) -> PathBuf {
        self.content_dir.join(&descriptor.file)
    }

    /// Read a page's source and split off its front-matter
    pub fn load(&self, descriptor: &PageDescriptor) -> Result<PageContent, LoadError> {
        let path = self.path_for(descriptor);

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound { path: path.clone() },
            _ => LoadError::Read {
                path: path.clone(),
                source: e,
            },
        })?;

        let (meta, body) = FrontMatter::parse(&content);

        let updated = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        tracing::debug!("Loaded {:?} for page '{}'", path, descriptor.id);

        Ok(PageContent {
            descriptor: descriptor.clone(),
            meta,
            body: body.to_string(),
            source: path,
            updated,
        })
    }
}
