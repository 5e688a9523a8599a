//! Table of contents rendering

use super::html::html_escape;
use crate::content::TocEntry;

/// Render headings up to `max_depth` as nested `<ol class="toc">` lists.
///
/// Returns an empty string when no heading is in range.
pub fn toc(entries: &[TocEntry], max_depth: usize) -> String {
    let entries: Vec<&TocEntry> = entries
        .iter()
        .filter(|e| (e.level as usize) <= max_depth)
        .collect();
    if entries.is_empty() {
        return String::new();
    }

    // Nest relative to the shallowest heading so a page without <h1> still
    // produces a flat top level.
    let base = entries.iter().map(|e| e.level).min().unwrap_or(1) as usize;

    let mut html = r#"<ol class="toc">"#.to_string();
    let mut current_level = base;

    for entry in entries {
        let level = entry.level as usize;

        while current_level < level {
            html.push_str(r#"<ol class="toc-child">"#);
            current_level += 1;
        }
        while current_level > level {
            html.push_str("</ol>");
            current_level -= 1;
        }

        html.push_str(&format!(
            "<li class=\"toc-item toc-level-{}\"><a class=\"toc-link\" href=\"#{}\"><span class=\"toc-text\">{}</span></a></li>",
            level,
            html_escape(&entry.id),
            html_escape(&entry.text)
        ));
    }

    while current_level > base {
        html.push_str("</ol>");
        current_level -= 1;
    }

    html.push_str("</ol>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u8, id: &str) -> TocEntry {
        TocEntry {
            level,
            id: id.to_string(),
            text: id.to_uppercase(),
        }
    }

    #[test]
    fn test_empty_toc() {
        assert_eq!(toc(&[], 3), "");
        assert_eq!(toc(&[entry(4, "deep")], 3), "");
    }

    #[test]
    fn test_flat_toc() {
        let html = toc(&[entry(2, "a"), entry(2, "b")], 3);
        assert_eq!(
            html,
            "<ol class=\"toc\">\
             <li class=\"toc-item toc-level-2\"><a class=\"toc-link\" href=\"#a\"><span class=\"toc-text\">A</span></a></li>\
             <li class=\"toc-item toc-level-2\"><a class=\"toc-link\" href=\"#b\"><span class=\"toc-text\">B</span></a></li>\
             </ol>"
        );
    }

    #[test]
    fn test_nested_toc_is_balanced() {
        let html = toc(
            &[
                entry(1, "a"),
                entry(2, "b"),
                entry(3, "c"),
                entry(4, "skipped"),
                entry(1, "d"),
                entry(3, "e"),
            ],
            3,
        );
        assert!(!html.contains("skipped"));
        assert_eq!(html.matches("<ol").count(), html.matches("</ol>").count());
        assert!(html.contains(r##"href="#e""##));
        assert!(html.ends_with("</li></ol></ol></ol>"));
    }

    #[test]
    fn test_toc_text_is_escaped() {
        let html = toc(
            &[TocEntry {
                level: 2,
                id: "a-b".to_string(),
                text: "A<B>".to_string(),
            }],
            3,
        );
        assert!(html.contains("A&lt;B&gt;"));
    }

    #[test]
    fn test_toc_id_is_escaped() {
        let html = toc(
            &[TocEntry {
                level: 2,
                id: r#"a"b"#.to_string(),
                text: "A".to_string(),
            }],
            3,
        );
        assert!(html.contains(r##"href="#a&quot;b""##));
    }
}
