//! Markup-to-text normalization.
//!
//! Converts a report page into plain, line-oriented text. Block-level
//! elements and `<br>` start new lines, inline whitespace collapses, and
//! bold text is wrapped in `**` so label lines keep the `*` marker the
//! extractors use to find the end of a value.

use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Collapses any run of line-ending characters into one `\n`.
static LINE_BREAKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid regex"));

/// Elements whose content never reaches the output.
const SKIPPED_ELEMENTS: &[&str] = &["head", "noscript", "script", "style", "template"];

/// Elements that start and end a line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "caption",
    "center",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "html",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Elements rendered as `**bold**`.
const EMPHASIS_ELEMENTS: &[&str] = &["b", "strong"];

const EMPHASIS_MARKER: &str = "**";

/// Converts an HTML document to normalized plain text.
#[must_use]
pub fn normalize(html: &str) -> String {
    normalize_line_breaks(&html_to_text(html))
}

/// Collapses every run of `\r` / `\n` characters into a single `\n`.
#[must_use]
pub fn normalize_line_breaks(text: &str) -> String {
    LINE_BREAKS_RE.replace_all(text, "\n").into_owned()
}

/// Renders an HTML document as text, one line per block element.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut renderer = TextRenderer::default();
    render_element(document.root_element(), &mut renderer);
    renderer.finish()
}

fn render_element(element: ElementRef<'_>, out: &mut TextRenderer) {
    let name = element.value().name();

    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        out.break_line();
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    // Empty `<b></b>` would otherwise leak a stray terminator.
    let emphasis =
        EMPHASIS_ELEMENTS.contains(&name) && element.text().any(|t| !t.trim().is_empty());

    if block {
        out.break_line();
    }
    if emphasis {
        out.push_marker(EMPHASIS_MARKER);
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_text(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    render_element(child_element, out);
                }
            }
            _ => {}
        }
    }

    if emphasis {
        out.push_marker(EMPHASIS_MARKER);
    }
    if block {
        out.break_line();
    }
}

/// Accumulates rendered text line by line.
#[derive(Debug, Default)]
struct TextRenderer {
    lines: Vec<String>,
    current: String,
}

impl TextRenderer {
    fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !self.current.is_empty() && !self.current.ends_with(' ') {
                    self.current.push(' ');
                }
            } else {
                self.current.push(ch);
            }
        }
    }

    fn push_marker(&mut self, marker: &str) {
        self.current.push_str(marker);
    }

    fn break_line(&mut self) {
        let line = self.current.trim();
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
        self.current.clear();
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}
