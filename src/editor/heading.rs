use std::sync::LazyLock;

use regex::Regex;

// Storage markup never nests headings, so a lazy scan to the next
// closing heading tag always closes the tag that opened.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h([1-6])[^>]*>(.*?)</h[1-6]>").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// A structural marker located in a document.
///
/// Offsets cover the whole heading element, opening tag through closing
/// tag, and are only valid for the exact body they were computed from.
/// Headings are recomputed on every query, never cached across edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Nesting depth 1-6, taken verbatim from the tag digit.
    pub level: u8,
    /// Inner text with markup stripped and whitespace trimmed.
    pub text: String,
    /// Byte offset of the opening tag.
    pub start: usize,
    /// Byte offset one past the closing tag.
    pub end: usize,
}

/// Scan a document for headings at levels 1-6, in document order.
///
/// Headings whose text is empty after stripping are dropped.
pub fn headings(document: &str) -> impl Iterator<Item = Heading> + '_ {
    HEADING_RE.captures_iter(document).filter_map(|caps| {
        let whole = caps.get(0)?;
        let level: u8 = caps.get(1)?.as_str().parse().ok()?;
        let text = strip_tags(caps.get(2)?.as_str());
        if text.is_empty() {
            return None;
        }
        Some(Heading {
            level,
            text,
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// Remove markup tags and trim surrounding whitespace.
pub fn strip_tags(markup: &str) -> String {
    TAG_RE.replace_all(markup, "").trim().to_string()
}
