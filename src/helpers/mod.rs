//! Helper functions for rendering
//!
//! URL generation, HTML text utilities and the table of contents.

mod html;
mod toc;
mod url;

pub use html::*;
pub use toc::toc;
pub use url::*;
