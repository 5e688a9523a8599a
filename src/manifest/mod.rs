//! Page manifest - the ordered list of pages that drives generation
//!
//! The manifest is built once from the site configuration and never mutated.
//! Its order defines prev/next navigation between pages.

mod resolver;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path};
use thiserror::Error;

pub use resolver::{Neighbors, Resolver};

/// Manifest construction and lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Duplicate page id in manifest: {0}")]
    DuplicateId(String),

    #[error("Page at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Page id '{0}' is not a valid route segment")]
    InvalidId(String),

    #[error("Source file '{1}' of page '{0}' is outside the content directory")]
    InvalidFile(String, String),
}

lazy_static! {
    // Ids double as output directory names and URL segments
    static ref PAGE_ID: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").unwrap();
}

/// Metadata record for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Unique identifier, also the page's route segment
    pub id: String,
    pub title: String,
    /// Source file, relative to the content directory
    pub file: String,
    #[serde(default, alias = "backgroundImage")]
    pub background_image: Option<String>,
}

impl PageDescriptor {
    pub fn new(id: &str, title: &str, file: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            file: file.to_string(),
            background_image: None,
        }
    }

    pub fn with_background(mut self, image: &str) -> Self {
        self.background_image = Some(image.to_string());
        self
    }
}

/// Ordered sequence of page descriptors with unique ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pages: Vec<PageDescriptor>,
}

impl Manifest {
    /// Build a manifest, rejecting empty, malformed or duplicate ids and
    /// source files that escape the content directory
    pub fn new(pages: Vec<PageDescriptor>) -> Result<Self, ManifestError> {
        let mut seen = HashSet::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            if page.id.trim().is_empty() {
                return Err(ManifestError::EmptyId(i));
            }
            if !PAGE_ID.is_match(&page.id) {
                return Err(ManifestError::InvalidId(page.id.clone()));
            }
            if !seen.insert(page.id.as_str()) {
                return Err(ManifestError::DuplicateId(page.id.clone()));
            }
            if !is_relative_file(&page.file) {
                return Err(ManifestError::InvalidFile(
                    page.id.clone(),
                    page.file.clone(),
                ));
            }
        }
        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageDescriptor> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// A non-empty relative path with no `..`, root or prefix components
fn is_relative_file(file: &str) -> bool {
    let path = Path::new(file);
    !file.trim().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a PageDescriptor;
    type IntoIter = std::slice::Iter<'a, PageDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
