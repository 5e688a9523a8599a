//! Built-in theme templates using the Tera template engine
//!
//! Templates and the stylesheet are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Stylesheet written to `css/style.css`
pub const STYLESHEET: &str = include_str!("theme/style.css");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Page bodies and the TOC are pre-rendered HTML; plain-text fields
        // go through the `escape` filter in the templates instead
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("page.html", include_str!("theme/page.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("theme/partials/head.html"),
            ),
            (
                "partials/pager.html",
                include_str!("theme/partials/pager.html"),
            ),
            ("partials/toc.html", include_str!("theme/partials/toc.html")),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => " ...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    /// All pages in manifest order
    pub pages: Vec<NavPage>,
}

impl SiteData {
    pub fn page(&self, id: &str) -> Option<&NavPage> {
        self.pages.iter().find(|p| p.id == id)
    }
}

/// A link to a page, used for navigation and the index
#[derive(Debug, Clone, Serialize)]
pub struct NavPage {
    pub id: String,
    pub title: String,
    pub path: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub id: String,
    pub title: String,
    pub path: String,
    pub permalink: String,
    pub description: Option<String>,
    pub content: String,
    pub background_image: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
}
