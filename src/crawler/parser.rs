//! HTML parser for extracting page text and anchors
//!
//! This module handles parsing HTML content to extract:
//! - Visible text (without script, style and page chrome)
//! - Anchors with their raw href and visible text
//! - Absolute links to follow

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Elements whose content never counts as page text
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer"];

/// An `<a href>` element as found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The href attribute, unresolved
    pub href: String,

    /// Concatenated visible text of the anchor
    pub text: String,
}

/// Extracts the visible text of an HTML document
///
/// Text inside `script`, `style`, `nav`, `header` and `footer` is dropped.
/// The remaining text nodes are trimmed, empty ones skipped, and the rest
/// joined with single spaces. The result is truncated to `max_chars`
/// characters.
///
/// # Example
///
/// ```
/// use metaharvest::crawler::extract_text;
///
/// let html = r#"<html><body><nav>Home</nav><h1>Census</h1><p> 2021 </p></body></html>"#;
/// assert_eq!(extract_text(html, 50_000), "Census 2021");
/// ```
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let mut chunks: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed);
        }
    }

    truncate_chars(&chunks.join(" "), max_chars)
}

/// Truncates a string to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Extracts every anchor with an href, in document order
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let mut anchors = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                anchors.push(Anchor {
                    href: href.to_string(),
                    text: element.text().collect::<String>(),
                });
            }
        }
    }

    anchors
}

/// Extracts all followable links from an HTML document as absolute URLs
///
/// Links are returned in document order; duplicates are kept so the caller
/// decides how to deduplicate.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    extract_anchors(html)
        .iter()
        .filter_map(|anchor| resolve_link(&anchor.href, base_url))
        .collect()
}
