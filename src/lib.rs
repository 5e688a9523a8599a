//! folio: a static site generator for manifest-driven Markdown handbooks
//!
//! A site is an ordered manifest of pages declared in `_config.yml`. Each
//! page is rendered from a Markdown file in the content directory, with a
//! table of contents, highlighted code and prev/next navigation.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod manifest;
pub mod templates;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use content::ContentLoader;
use manifest::{Manifest, Resolver};

/// Site configuration file name
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (Markdown) directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets directory, copied verbatim
    pub static_dir: PathBuf,
    /// Page lookup over the configured manifest
    pub resolver: Resolver,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::warn!("No {} found in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Create a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let manifest =
            Manifest::new(config.pages.clone()).context("Invalid page manifest in config")?;

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
            resolver: Resolver::new(manifest),
        })
    }

    /// Loader for this site's content directory
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.content_dir)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<generator::BuildReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
