//! Markdown rendering with syntax highlighting and heading anchors

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::HashSet;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

/// A heading collected while rendering, used to build the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// Output of a Markdown render
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML, assigning an id to every heading
    pub fn render(&self, markdown: &str) -> RenderedMarkdown {
        // Front-matter is stripped by the loader, so no metadata block option
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut toc = Vec::new();
        let mut used_ids: HashSet<String> = HashSet::new();

        // (index of the heading start event, heading text so far)
        let mut heading: Option<(usize, String)> = None;
        // (language, code so far)
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            if let Some((lang, code)) = code_block.as_mut() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlight_code(code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block = None;
                    }
                    Event::Text(text) => code.push_str(&text),
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Heading { .. }) => {
                    heading = Some((events.len(), String::new()));
                    events.push(event);
                }
                Event::Text(ref text) | Event::Code(ref text) if heading.is_some() => {
                    if let Some((_, buf)) = heading.as_mut() {
                        buf.push_str(text);
                    }
                    events.push(event);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((index, text)) = heading.take() {
                        let entry = assign_heading_id(&mut events[index], &text, &mut used_ids);
                        toc.extend(entry);
                    }
                    events.push(event);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        RenderedMarkdown {
            html: html_output,
            toc,
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let lang_class = html_escape(lang);

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => {
                self.add_line_numbers(&highlighted, code, &lang_class)
            }
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang_class, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang_class,
                html_escape(code)
            ),
        }
    }

    /// Wrap highlighted code in a table with a line-number gutter
    fn add_line_numbers(&self, highlighted: &str, code: &str, lang: &str) -> String {
        let line_count = code.lines().count().max(1);
        let gutter = (1..=line_count)
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang, gutter, highlighted
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Give a heading start event an id and describe it for the TOC
fn assign_heading_id(
    event: &mut Event<'_>,
    text: &str,
    used_ids: &mut HashSet<String>,
) -> Option<TocEntry> {
    let Event::Start(Tag::Heading { level, id, .. }) = event else {
        return None;
    };

    let anchor = match id.as_deref() {
        Some(explicit) => {
            used_ids.insert(explicit.to_string());
            explicit.to_string()
        }
        None => unique_id(text, used_ids),
    };
    *id = Some(CowStr::from(anchor.clone()));

    Some(TocEntry {
        level: *level as u8,
        id: anchor,
        text: text.trim().to_string(),
    })
}

/// Slugify heading text, suffixing repeats with -1, -2, ... until the id
/// has not been handed out on this page
fn unique_id(text: &str, used_ids: &mut HashSet<String>) -> String {
    let mut base = slug::slugify(text);
    if base.is_empty() {
        base = "section".to_string();
    }

    let mut id = base.clone();
    let mut suffix = 1;
    while used_ids.contains(&id) {
        id = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    used_ids.insert(id.clone());
    id
}
