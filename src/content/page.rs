//! Loaded page model

use chrono::{DateTime, Local};
use std::path::PathBuf;

use super::FrontMatter;
use crate::manifest::PageDescriptor;

/// A page's descriptor together with its source body
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Manifest entry this content belongs to
    pub descriptor: PageDescriptor,

    /// Parsed metadata block (default when the file has none)
    pub meta: FrontMatter,

    /// Raw markup with the metadata block removed
    pub body: String,

    /// Full source file path
    pub source: PathBuf,

    /// Source file modification time
    pub updated: Option<DateTime<Local>>,
}

impl PageContent {
    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn title(&self) -> &str {
        &self.descriptor.title
    }
}
