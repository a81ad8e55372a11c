//! The page-section editing engine.
//!
//! Everything here is a pure transformation over a document body:
//! locate a heading, compute the section it governs, splice a rendered
//! fragment in, and return a new body. The editor keeps no state
//! between calls and performs no I/O; offsets computed from one body
//! are never reused against another. Callers apply edits one at a
//! time so each transformation observes the previous one's result.

mod heading;
mod locate;
mod render;

pub use heading::{headings, Heading};
pub use locate::{find_heading, section_end, ExactMatch, HeadingMatcher, SubstringMatch};
pub use render::{render_journal_entry, render_project};

use crate::models::{JournalEntry, Project};

/// Heading texts that mark page structure rather than projects.
const STRUCTURAL_HEADINGS: [&str; 5] = [
    "journal",
    "projects",
    "executive summary",
    "prototypes",
    "simulation, white paper, and supporting work products",
];

/// Insert a journal entry at the top of the journal section.
///
/// With a configured heading label the search covers levels 1-6;
/// without one, any level 1-3 heading containing the word "Journal"
/// marks the section. The fragment lands immediately after the
/// heading's closing tag, before existing section content, so entries
/// pushed in sequence accumulate newest-first. When no heading matches,
/// the entry is placed at the very start of the document and the whole
/// page acts as an implicit journal.
pub fn insert_journal_entry(
    document: &str,
    entry: &JournalEntry,
    journal_heading: Option<&str>,
) -> String {
    let fragment = render_journal_entry(entry);

    let heading = match journal_heading {
        Some(label) => find_heading(document, label, 1..=6, &SubstringMatch),
        None => find_heading(document, "Journal", 1..=3, &SubstringMatch),
    };

    match heading {
        Some(h) => format!("{}\n{}{}", &document[..h.end], fragment, &document[h.end..]),
        None => {
            tracing::warn!("No journal heading matched; inserting entry at the top of the page");
            format!("{}{}", fragment, document)
        }
    }
}

/// Insert or replace a project's section.
///
/// An existing section is found by matching the project title against
/// heading text at levels 2-3, or 2-4 when candidate labels are
/// supplied (configured pages may nest projects one level deeper). On
/// a hit the section body is replaced and the heading is kept verbatim,
/// so a heading with extra text or different casing is not retitled.
/// Otherwise a new level-3 section goes under the first matching
/// candidate heading, then under a "Projects" heading, and as a last
/// resort a new level-2 section is appended at the document end.
pub fn upsert_project(
    document: &str,
    project: &Project,
    candidate_headings: Option<&[String]>,
) -> String {
    let fragment = render_project(project);

    let search_levels = if candidate_headings.is_some() {
        2..=4
    } else {
        2..=3
    };
    if let Some(h) = find_heading(document, &project.title, search_levels, &SubstringMatch) {
        // The body runs to the next heading of level 3 or shallower, so
        // sibling h3 sections survive and the fragment's own level-4
        // sub-blocks fall inside the replaced span.
        let end = section_end(document, h.end, 3);
        return format!("{}\n{}{}", &document[..h.end], fragment, &document[end..]);
    }

    for label in candidate_headings.unwrap_or_default() {
        if let Some(h) = find_heading(document, label, 1..=3, &SubstringMatch) {
            return insert_subsection(document, h.end, &project.title, &fragment);
        }
    }

    if let Some(h) = find_heading(document, "Projects", 1..=2, &SubstringMatch) {
        return insert_subsection(document, h.end, &project.title, &fragment);
    }

    if document.is_empty() {
        format!("<h2>{}</h2>\n{}", project.title, fragment)
    } else {
        format!("{}\n<h2>{}</h2>\n{}", document, project.title, fragment)
    }
}

fn insert_subsection(document: &str, at: usize, title: &str, fragment: &str) -> String {
    format!(
        "{}\n<h3>{}</h3>\n{}{}",
        &document[..at],
        title,
        fragment,
        &document[at..]
    )
}

/// Titles of the project sections already on the page, in document
/// order. Level 2-3 headings count as projects unless their text is a
/// structural label. Repeated titles are kept, not de-duplicated, but
/// each repeat is reported since upserts only ever touch the first.
pub fn list_project_titles(document: &str) -> Vec<String> {
    let titles: Vec<String> = headings(document)
        .filter(|h| (2..=3).contains(&h.level))
        .filter(|h| !STRUCTURAL_HEADINGS.contains(&h.text.to_lowercase().as_str()))
        .map(|h| h.text)
        .collect();

    // Same case folding as the matchers, so the warning agrees with
    // what an upsert would actually collide on.
    for (i, title) in titles.iter().enumerate() {
        let folded = title.to_lowercase();
        if titles[..i].iter().any(|t| t.to_lowercase() == folded) {
            tracing::warn!("Repeated project heading on page: '{}'", title);
        }
    }

    titles
}
