//! Plain-text extraction from report markup.

use scraper::{ElementRef, Html};

/// Convert an HTML document to plain text.
///
/// Text nodes are collected in reading order, trimmed, and joined with
/// newlines; empty segments and `script`/`style` content are dropped. The
/// reports are legacy table layouts, so one line per text block is the most
/// faithful flat rendering we can produce.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut segments = Vec::new();
    collect_segments(document.root_element(), &mut segments);
    segments.join("\n")
}

fn collect_segments(element: ElementRef<'_>, out: &mut Vec<String>) {
    if matches!(element.value().name(), "script" | "style") {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let segment = text.trim();
            if !segment.is_empty() {
                out.push(segment.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_segments(child_element, out);
        }
    }
}
