//! Front-matter parsing

use serde::{Deserialize, Serialize};

/// Metadata block at the top of a content file.
///
/// Only the description is used; other keys are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub description: Option<String>,
}

impl FrontMatter {
    /// Split a content string into its front-matter and body.
    ///
    /// A YAML block opens with a `---` line and closes with the next `---`
    /// line; a JSON block uses `;;;` lines instead. The block and the line
    /// ending after its closing delimiter are removed. Without a block the
    /// whole input is returned as the body.
    pub fn parse(content: &str) -> (Self, &str) {
        if let Some(rest) = strip_opening(content, "---") {
            return Self::parse_yaml(content, rest);
        }

        if let Some(rest) = strip_opening(content, ";;;") {
            return Self::parse_json(content, rest);
        }

        (FrontMatter::default(), content)
    }

    fn parse_yaml<'a>(content: &'a str, rest: &'a str) -> (Self, &'a str) {
        let Some((yaml_content, remaining)) = split_block(rest, "---") else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A leading `---` is also a Markdown thematic break. Only treat the
        // block as front-matter when some line has a `key: value` shape.
        let has_yaml_structure = yaml_content.lines().any(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return false;
            }
            if let Some(colon_pos) = trimmed.find(':') {
                let before_colon = &trimmed[..colon_pos];
                let is_valid_key = !before_colon.is_empty()
                    && before_colon
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                    && before_colon != "http"
                    && before_colon != "https"
                    && before_colon != "ftp";
                if is_valid_key {
                    let after_colon = &trimmed[colon_pos + 1..];
                    return after_colon.is_empty() || after_colon.starts_with(' ');
                }
            }
            false
        });

        if !has_yaml_structure {
            tracing::warn!("Leading `---` block has no `key: value` lines, treating as content");
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    fn parse_json<'a>(content: &'a str, rest: &'a str) -> (Self, &'a str) {
        let Some((json_content, remaining)) = split_block(rest, ";;;") else {
            return (FrontMatter::default(), content);
        };

        let json_content = json_content.trim();
        let json_content = if json_content.starts_with('{') {
            json_content.to_string()
        } else {
            // JSON front-matter may omit the outer braces
            format!("{{{}}}", json_content)
        };

        match serde_json::from_str::<FrontMatter>(&json_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse JSON front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }
}

/// Return the text after the first line if that line is exactly `delim`
fn strip_opening<'a>(content: &'a str, delim: &str) -> Option<&'a str> {
    let newline = content.find('\n')?;
    let first = content[..newline].trim_end_matches('\r');
    (first == delim).then(|| &content[newline + 1..])
}

/// Split at the first line that is exactly `delim`.
/// Returns (block, text after the delimiter line).
fn split_block<'a>(rest: &'a str, delim: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == delim {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: Layers and packets
tags:
  - network
  - tcp
---

# Heading

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.description, Some("Layers and packets".to_string()));
        assert_eq!(body, "\n# Heading\n\nThis is the content.\n");
    }

    #[test]
    fn test_no_frontmatter_is_unchanged() {
        let content = "\n# Title\n\nSome *text*.\n\n---\n\nMore.\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_crlf_frontmatter() {
        let content = "---\r\ndescription: Windows\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.description, Some("Windows".to_string()));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody\n");
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_unclosed_block_is_content() {
        let content = "---\ndescription: Never closed\n\nBody\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.description, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n\"title\": \"Test Post\",\n\"description\": \"Block ciphers\"\n;;;\nThis is content.\n";

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.description, Some("Block ciphers".to_string()));
        assert_eq!(body, "This is content.\n");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let content = "---\ntitle: Extra\nweight: 3\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = "---\nCheck out https://example.com/path and http://test.com\n---\nMore.\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_invalid_yaml_is_content() {
        let content = "---\ntitle: [unterminated\n---\nBody\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }
}
