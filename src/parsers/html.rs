use crate::parsers::text;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Elements whose whole subtree is dropped before text extraction.
///
/// `noscript` content is parsed as raw markup, so it would otherwise leak
/// tags such as tracking iframes into the text.
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("static selector"));

/// Reduces an HTML document to clean, line-oriented body text.
///
/// Script and style subtrees are removed, every text run becomes its own
/// line(s), lines are trimmed and empty ones dropped. A document without a
/// `<body>` tag in its source yields an empty string, even though the parser
/// would synthesize one.
pub fn normalize(html: &str) -> String {
    if !has_body_tag(html) {
        ::log::debug!("Document has no body tag");
        return String::new();
    }

    let doc = Html::parse_document(html);

    let Some(body) = doc.select(&BODY_SELECTOR).next() else {
        ::log::debug!("Document has no body element");
        return String::new();
    };

    let mut runs = Vec::new();
    collect_text_runs(body, &mut runs);

    text::clean_lines(&runs.join("\n"))
}

/// Whether the raw markup carries a `<body>` start tag
fn has_body_tag(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    lower.match_indices("<body").any(|(at, tag)| {
        matches!(
            lower.as_bytes().get(at + tag.len()),
            Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
        )
    })
}

/// Walks an element depth-first, collecting text nodes outside skipped subtrees
fn collect_text_runs<'a>(element: ElementRef<'a>, runs: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            runs.push(&**text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if SKIPPED_ELEMENTS.contains(&child_element.value().name()) {
                continue;
            }
            collect_text_runs(child_element, runs);
        }
    }
}

/// Text of an element with every text node trimmed and concatenated.
///
/// Returns `None` when nothing but whitespace remains.
pub fn stripped_text(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .text()
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .collect::<String>();

    if text.is_empty() { None } else { Some(text) }
}

