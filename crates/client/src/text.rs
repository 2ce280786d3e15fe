//! Visible-text extraction from HTML pages.
//!
//! Produces a compact plain-text rendition of a page with script and
//! style contents dropped and whitespace runs collapsed to line breaks.
//! Output length is capped at a caller-chosen character count.

use scraper::{Html, Node};

/// Marker appended when extracted text is cut at the character cap.
pub const CONTINUATION_MARKER: &str = "...";

/// Extract readable text from an HTML document, capped at `max_chars`
/// characters plus the continuation marker.
pub fn visible_text(html: &str, max_chars: usize) -> String {
    truncate_chars(collapse_whitespace(&collect_text(html)), max_chars)
}

/// Concatenate every text node outside script and style elements.
fn collect_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let skipped = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| el.name() == "script" || el.name() == "style")
            });
            if !skipped {
                out.push_str(text);
            }
        }
    }

    out
}

/// Collapse whitespace to one phrase per line.
///
/// Splits each line on double-space runs, trims the pieces, and drops
/// empties, so layout indentation and blank lines disappear.
fn collapse_whitespace(text: &str) -> String {
    let mut phrases = Vec::new();

    for line in text.lines() {
        for phrase in line.trim().split("  ") {
            let phrase = phrase.trim();
            if !phrase.is_empty() {
                phrases.push(phrase);
            }
        }
    }

    phrases.join("\n")
}

/// Cut at a character boundary, never mid-codepoint.
fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            let mut cut = text[..idx].to_string();
            cut.push_str(CONTINUATION_MARKER);
            cut
        }
        None => text,
    }
}
