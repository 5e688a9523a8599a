//! Content module - loads page sources and renders their Markdown

mod frontmatter;
pub mod loader;
mod markdown;
mod page;

pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, LoadError};
pub use markdown::{MarkdownRenderer, RenderedMarkdown, TocEntry};
pub use page::PageContent;
