//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::manifest::PageDescriptor;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    /// Header image used when a page has no `background_image`
    pub default_background: Option<String>,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub toc: TocConfig,

    /// The ordered page manifest
    #[serde(default)]
    pub pages: Vec<PageDescriptor>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            default_background: None,

            highlight: HighlightConfig::default(),
            toc: TocConfig::default(),

            pages: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Background image for a page, falling back to the site default
    pub fn background_for<'a>(&'a self, page: &'a PageDescriptor) -> Option<&'a str> {
        page.background_image
            .as_deref()
            .or(self.default_background.as_deref())
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Table of contents configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub enable: bool,
    pub max_depth: usize,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            enable: true,
            max_depth: 3,
        }
    }
}
