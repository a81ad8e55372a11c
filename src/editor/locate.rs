use std::ops::RangeInclusive;

use super::heading::{headings, Heading};

/// Strategy for deciding whether a heading's text matches a target
/// label. Labels are literal text, never a pattern, so a label
/// containing metacharacters matches only itself.
pub trait HeadingMatcher {
    fn matches(&self, heading_text: &str, label: &str) -> bool;
}

/// Case-insensitive containment. Permissive: a label of "Core" also
/// matches a heading titled "Core Infrastructure Review".
pub struct SubstringMatch;

impl HeadingMatcher for SubstringMatch {
    fn matches(&self, heading_text: &str, label: &str) -> bool {
        heading_text.to_lowercase().contains(&label.to_lowercase())
    }
}

/// Case-insensitive whole-text equality, for callers that cannot
/// tolerate substring over-matching.
pub struct ExactMatch;

impl HeadingMatcher for ExactMatch {
    fn matches(&self, heading_text: &str, label: &str) -> bool {
        heading_text.to_lowercase() == label.to_lowercase()
    }
}

/// Find the first heading within the given levels whose text matches
/// the label. Ties break by document order; additional matches are
/// reported as a data-quality warning and the first one is used.
pub fn find_heading(
    document: &str,
    label: &str,
    levels: RangeInclusive<u8>,
    matcher: &dyn HeadingMatcher,
) -> Option<Heading> {
    let mut matches =
        headings(document).filter(|h| levels.contains(&h.level) && matcher.matches(&h.text, label));
    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            "{} headings match '{}'; using the first ('{}')",
            extra + 1,
            label,
            first.text
        );
    }
    Some(first)
}

/// Byte offset where the section beginning at `from` ends: the start
/// of the next heading at `max_level` or shallower, or document end.
pub fn section_end(document: &str, from: usize, max_level: u8) -> usize {
    headings(document)
        .find(|h| h.start >= from && h.level <= max_level)
        .map_or(document.len(), |h| h.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_in_document_order_wins() {
        let doc = "<h2>Apollo</h2><p>a</p><h3>Apollo Extras</h3>";
        let h = find_heading(doc, "apollo", 2..=3, &SubstringMatch).unwrap();
        assert_eq!(h.level, 2);
        assert_eq!(h.start, 0);
    }

    #[test]
    fn match_is_case_insensitive() {
        let doc = "<h2>MOONBASE Alpha</h2>";
        assert!(find_heading(doc, "moonbase alpha", 2..=3, &SubstringMatch).is_some());
    }

    #[test]
    fn level_restriction_excludes_other_levels() {
        let doc = "<h1>Apollo</h1>";
        assert!(find_heading(doc, "Apollo", 2..=3, &SubstringMatch).is_none());
    }

    #[test]
    fn labels_are_literal_text_not_patterns() {
        // A pattern reading of "Costs (Q3)" would match this heading.
        let doc = "<h2>Costs Q3</h2>";
        assert!(find_heading(doc, "Costs (Q3)", 2..=3, &SubstringMatch).is_none());

        let doc = "<h2>Costs (Q3)</h2>";
        assert!(find_heading(doc, "Costs (Q3)", 2..=3, &SubstringMatch).is_some());
    }

    #[test]
    fn exact_match_rejects_substring_expansion() {
        let doc = "<h2>Core Infrastructure Review</h2>";
        assert!(find_heading(doc, "Core", 2..=3, &SubstringMatch).is_some());
        assert!(find_heading(doc, "Core", 2..=3, &ExactMatch).is_none());
        assert!(find_heading(doc, "core infrastructure review", 2..=3, &ExactMatch).is_some());
    }

    #[test]
    fn matches_against_stripped_text() {
        let doc = "<h2><em>Apollo</em> Program</h2>";
        let h = find_heading(doc, "Apollo Program", 2..=3, &SubstringMatch).unwrap();
        assert_eq!(h.text, "Apollo Program");
    }

    #[test]
    fn section_ends_at_next_shallow_heading() {
        let doc = "<h2>Apollo</h2><p>body</p><h4>Sub</h4><p>more</p><h2>Other</h2>";
        let apollo = find_heading(doc, "Apollo", 2..=3, &SubstringMatch).unwrap();
        let end = section_end(doc, apollo.end, 2);
        assert_eq!(&doc[end..], "<h2>Other</h2>");
    }

    #[test]
    fn section_runs_to_document_end_without_boundary() {
        let doc = "<h2>Apollo</h2><p>body</p><h4>Sub</h4>";
        let apollo = find_heading(doc, "Apollo", 2..=3, &SubstringMatch).unwrap();
        assert_eq!(section_end(doc, apollo.end, 2), doc.len());
    }
}
