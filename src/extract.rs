//! Description extraction from fetched HTML pages.
//!
//! Rules are tried in order, each only when the previous one yields nothing:
//!
//! 1. The first non-empty paragraph inside the page's main prose section.
//! 2. The `content` attribute of `<meta name="description">`.
//!
//! The rules follow the current markup of the description sources and are a
//! heuristic: a page redesign upstream can change what they find. Parsing is
//! done by `scraper` (html5ever), which recovers from malformed markup
//! instead of failing.

use scraper::{Html, Selector};

/// Containers that hold the page's prose, most specific first.
const PROSE_SELECTORS: &[&str] = &[
    ".prose p",
    ".markdown-body p",
    "article p",
    "main p",
    "[role='main'] p",
];

/// Extract a description from `html`, or `None` when no rule matches.
pub fn extract_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    first_prose_paragraph(&document).or_else(|| meta_description(&document))
}

/// Like [`extract_description`], truncated to `max_chars` on a word boundary.
pub fn extract_description_truncated(html: &str, max_chars: usize) -> Option<String> {
    extract_description(html).map(|text| truncate_description(&text, max_chars))
}

fn first_prose_paragraph(document: &Html) -> Option<String> {
    for selector_str in PROSE_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let found = document
            .select(&selector)
            .map(|p| clean_text(&p.text().collect::<Vec<_>>().join(" ")))
            .find(|text| !text.is_empty());
        if found.is_some() {
            return found;
        }
    }
    None
}

fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name]").ok()?;
    document
        .select(&selector)
        .filter(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.eq_ignore_ascii_case("description"))
        })
        .filter_map(|el| el.value().attr("content"))
        .map(clean_text)
        .find(|text| !text.is_empty())
}

/// Collapse runs of whitespace into single spaces and drop the remaining
/// control characters, so page text cannot carry terminal escape sequences.
fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max_chars` characters, cutting at the last space
/// when there is one, and mark the cut with `...`.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}...", truncated[..last_space].trim_end()),
        _ => format!("{}...", truncated),
    }
}
