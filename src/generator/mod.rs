//! Generator module - renders every manifest page to static HTML

use anyhow::{Context as _, Result};
use chrono::Datelike;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, PageContent, RenderedMarkdown};
use crate::helpers::{css, full_url_for, page_url, plain_text, toc, url_for};
use crate::templates::{ConfigData, NavPage, PageData, SiteData, TemplateRenderer, STYLESHEET};
use crate::Site;

/// Summary of a finished build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages written, one per manifest entry
    pub pages: usize,
    /// Static files copied
    pub assets: usize,
}

/// A page loaded and rendered, ready to be written
struct BuiltPage {
    content: PageContent,
    rendered: RenderedMarkdown,
}

/// Static site generator using Tera templates
pub struct Generator<'a> {
    site: &'a Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );

        Ok(Self {
            site,
            renderer,
            markdown,
        })
    }

    /// Generate the entire site.
    ///
    /// Every page is loaded before anything is written, so a missing or
    /// unreadable source fails the build without partial output.
    pub fn generate(&self) -> Result<BuildReport> {
        let pages = self.build_pages()?;
        tracing::info!("Loaded {} pages", pages.len());

        fs::create_dir_all(&self.site.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.site.public_dir))?;

        let site_data = self.build_site_data(&pages);
        let config_data = self.build_config_data();

        for page in &pages {
            self.write_page(page, &site_data, &config_data)?;
        }

        self.write_index(&site_data, &config_data)?;
        self.write_stylesheet()?;
        let assets = self.copy_static_assets()?;
        self.write_search_index(&pages)?;

        Ok(BuildReport {
            pages: pages.len(),
            assets,
        })
    }

    /// Resolve, load and render every page in parallel
    fn build_pages(&self) -> Result<Vec<BuiltPage>> {
        let resolver = &self.site.resolver;
        let loader = self.site.loader();

        resolver
            .page_ids()
            .par_iter()
            .map(|id| -> Result<BuiltPage> {
                let descriptor = resolver.resolve(id)?;
                let content = loader
                    .load(descriptor)
                    .with_context(|| format!("Failed to load page '{}'", id))?;
                let rendered = self.markdown.render(&content.body);
                Ok(BuiltPage { content, rendered })
            })
            .collect()
    }

    /// Build site data for templates
    fn build_site_data(&self, pages: &[BuiltPage]) -> SiteData {
        let pages = pages
            .iter()
            .map(|p| NavPage {
                id: p.content.id().to_string(),
                title: p.content.title().to_string(),
                path: page_url(&self.site.config, p.content.id()),
                description: p.content.meta.description.clone(),
            })
            .collect();

        SiteData { pages }
    }

    /// Build config data for templates
    fn build_config_data(&self) -> ConfigData {
        let config = &self.site.config;
        ConfigData {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: url_for(config, "/"),
        }
    }

    /// Create a base context with common variables
    fn create_base_context(&self, site_data: &SiteData, config_data: &ConfigData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("config", config_data);
        context.insert("stylesheet", &css(&self.site.config, "style.css"));
        context.insert("current_year", &chrono::Local::now().year().to_string());
        context
    }

    /// Render and write one page with its prev/next links
    fn write_page(
        &self,
        page: &BuiltPage,
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<()> {
        let config = &self.site.config;
        let descriptor = &page.content.descriptor;
        let id = descriptor.id.as_str();

        let nav = self.site.resolver.neighbors(id)?;
        let prev_page = nav.previous.and_then(|p| site_data.page(&p.id));
        let next_page = nav.next.and_then(|p| site_data.page(&p.id));

        let background_image = config.background_for(descriptor).map(str::to_string);
        if background_image.is_none() {
            tracing::debug!("No background image for '{}', using plain header", id);
        }

        let toc_html = if config.toc.enable {
            toc(&page.rendered.toc, config.toc.max_depth)
        } else {
            String::new()
        };

        let path = page_url(config, id);
        let permalink = full_url_for(config, &path);
        let description = page.content.meta.description.clone();

        let page_data = PageData {
            id: id.to_string(),
            title: descriptor.title.clone(),
            path,
            permalink: permalink.clone(),
            description: description.clone(),
            content: page.rendered.html.clone(),
            background_image,
            updated: page
                .content
                .updated
                .map(|d| d.format("%Y-%m-%d").to_string()),
        };

        let mut context = self.create_base_context(site_data, config_data);
        context.insert("current_id", id);
        context.insert("description", &description.unwrap_or_default());
        context.insert("permalink", &permalink);
        context.insert("page", &page_data);
        context.insert("prev_page", &prev_page);
        context.insert("next_page", &next_page);
        context.insert("show_toc", &!toc_html.is_empty());
        context.insert("toc", &toc_html);

        let html = self
            .renderer
            .render("page.html", &context)
            .with_context(|| format!("Failed to render page '{}'", id))?;

        let output_path = self.site.public_dir.join(id).join("index.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated page: {:?}", output_path);

        Ok(())
    }

    /// Write the landing page listing every page in manifest order
    fn write_index(&self, site_data: &SiteData, config_data: &ConfigData) -> Result<()> {
        let config = &self.site.config;

        let mut context = self.create_base_context(site_data, config_data);
        context.insert("current_id", "");
        context.insert("description", &config.description);
        context.insert("permalink", &full_url_for(config, "/"));

        let html = self.renderer.render("index.html", &context)?;
        let output_path = self.site.public_dir.join("index.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let output_path = self.site.public_dir.join("css").join("style.css");
        write_file(&output_path, STYLESHEET)
    }

    /// Copy the static directory into the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(copied)
    }

    /// Generate search index (JSON)
    fn write_search_index(&self, pages: &[BuiltPage]) -> Result<()> {
        let search_data: Vec<serde_json::Value> = pages
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.content.id(),
                    "title": p.content.title(),
                    "url": page_url(&self.site.config, p.content.id()),
                    "content": plain_text(&p.rendered.html),
                })
            })
            .collect();

        let output_path = self.site.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&search_data)?;
        write_file(&output_path, &json)?;
        tracing::debug!("Generated search.json");

        Ok(())
    }
}

/// Write a file, creating parent directories
fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::LoadError;
    use crate::manifest::PageDescriptor;
    use tempfile::TempDir;

    fn site(dir: &TempDir, pages: Vec<PageDescriptor>) -> Site {
        let config = SiteConfig {
            title: "Study Notes".to_string(),
            default_background: Some("/images/default.jpg".to_string()),
            pages,
            ..SiteConfig::default()
        };
        Site::with_config(dir.path(), config).unwrap()
    }

    fn write_content(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join("content").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn three_pages(dir: &TempDir) -> Vec<PageDescriptor> {
        write_content(
            dir,
            "network.md",
            "---\ndescription: Packets and layers\n---\n# Layers\n\n## Transport\n\nTCP.\n",
        );
        write_content(dir, "os.md", "# Processes\n\n```c\nint main(void) { return 0; }\n```\n");
        write_content(dir, "crypto.md", "Ciphers without headings.\n");

        vec![
            PageDescriptor::new("network", "Computer Networks", "network.md")
                .with_background("/images/network.jpg"),
            PageDescriptor::new("os", "Operating Systems", "os.md"),
            PageDescriptor::new("crypto", "Cryptography", "crypto.md"),
        ]
    }

    fn read(dir: &TempDir, path: &str) -> String {
        fs::read_to_string(dir.path().join("public").join(path)).unwrap()
    }

    #[test]
    fn test_generate_site() {
        let dir = TempDir::new().unwrap();
        let pages = three_pages(&dir);
        let site = site(&dir, pages);

        let report = Generator::new(&site).unwrap().generate().unwrap();
        assert_eq!(report.pages, 3);
        assert_eq!(report.assets, 0);

        let index = read(&dir, "index.html");
        assert!(index.contains(r#"<a href="/network/">Computer Networks</a>"#));
        assert!(index.contains("Packets and layers"));
        assert!(dir.path().join("public/css/style.css").exists());

        let search: serde_json::Value = serde_json::from_str(&read(&dir, "search.json")).unwrap();
        assert_eq!(search.as_array().unwrap().len(), 3);
        assert_eq!(search[1]["url"], "/os/");
    }

    #[test]
    fn test_page_navigation() {
        let dir = TempDir::new().unwrap();
        let pages = three_pages(&dir);
        let site = site(&dir, pages);
        Generator::new(&site).unwrap().generate().unwrap();

        let network = read(&dir, "network/index.html");
        assert!(!network.contains("pager-prev"));
        assert!(network.contains(r#"class="pager-next" href="/os/""#));

        let os = read(&dir, "os/index.html");
        assert!(os.contains(r#"class="pager-prev" href="/network/""#));
        assert!(os.contains(r#"class="pager-next" href="/crypto/""#));

        let crypto = read(&dir, "crypto/index.html");
        assert!(crypto.contains(r#"class="pager-prev" href="/os/""#));
        assert!(!crypto.contains("pager-next"));
    }

    #[test]
    fn test_page_content() {
        let dir = TempDir::new().unwrap();
        let pages = three_pages(&dir);
        let site = site(&dir, pages);
        Generator::new(&site).unwrap().generate().unwrap();

        let network = read(&dir, "network/index.html");
        assert!(network.contains(r#"<h2 id="transport">Transport</h2>"#));
        assert!(network.contains(r##"href="#transport""##));
        assert!(network.contains("url('/images/network.jpg')"));
        assert!(!network.contains("description:"));

        // Falls back to the site default background
        let os = read(&dir, "os/index.html");
        assert!(os.contains("url('/images/default.jpg')"));
        assert!(os.contains(r#"<figure class="highlight c">"#));

        // No headings, no TOC
        let crypto = read(&dir, "crypto/index.html");
        assert!(!crypto.contains("page-toc"));
    }

    #[test]
    fn test_missing_file_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let mut pages = three_pages(&dir);
        pages.push(PageDescriptor::new("missing", "Missing", "missing.md"));
        let site = site(&dir, pages);

        let err = Generator::new(&site).unwrap().generate().unwrap_err();
        let load_err = err
            .chain()
            .find_map(|e| e.downcast_ref::<LoadError>())
            .expect("load error in chain");
        assert!(matches!(load_err, LoadError::FileNotFound { .. }));
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_static_assets_copied() {
        let dir = TempDir::new().unwrap();
        let pages = three_pages(&dir);
        let images = dir.path().join("static").join("images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("network.jpg"), b"jpg").unwrap();
        fs::write(dir.path().join("static").join("favicon.ico"), b"ico").unwrap();

        let site = site(&dir, pages);
        let report = Generator::new(&site).unwrap().generate().unwrap();
        assert_eq!(report.assets, 2);
        assert_eq!(
            fs::read(dir.path().join("public/images/network.jpg")).unwrap(),
            b"jpg"
        );
    }

    #[test]
    fn test_toc_disabled() {
        let dir = TempDir::new().unwrap();
        let pages = three_pages(&dir);
        let mut site = site(&dir, pages);
        site.config.toc.enable = false;
        Generator::new(&site).unwrap().generate().unwrap();

        let network = read(&dir, "network/index.html");
        assert!(!network.contains("page-toc"));
        assert!(network.contains(r#"id="transport""#));
    }

    #[test]
    fn test_title_and_description_are_escaped() {
        let dir = TempDir::new().unwrap();
        write_content(
            &dir,
            "cia.md",
            "---\ndescription: The \"CIA\" triad & <b>more</b>\n---\nBody.\n",
        );
        let site = site(
            &dir,
            vec![PageDescriptor::new("cia", "A & B <i>", "cia.md")],
        );
        Generator::new(&site).unwrap().generate().unwrap();

        let page = read(&dir, "cia/index.html");
        assert!(page.contains(
            r#"<meta name="description" content="The &quot;CIA&quot; triad &amp; more">"#
        ));
        assert!(page.contains("<title>A &amp; B &lt;i&gt; | Study Notes</title>"));
        assert!(page.contains(r#"<h1 class="page-title">A &amp; B &lt;i&gt;</h1>"#));
        assert!(!page.contains("<i>"));
        assert!(!page.contains("<b>more"));

        let index = read(&dir, "index.html");
        assert!(index.contains("A &amp; B &lt;i&gt;</a>"));
    }

    #[test]
    fn test_custom_root() {
        let dir = TempDir::new().unwrap();
        let pages = three_pages(&dir);
        let mut site = site(&dir, pages);
        site.config.root = "/notes/".to_string();
        Generator::new(&site).unwrap().generate().unwrap();

        let os = read(&dir, "os/index.html");
        assert!(os.contains(r#"href="/notes/network/""#));
        assert!(os.contains(r#"href="/notes/css/style.css""#));
    }
}
