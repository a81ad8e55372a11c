use crate::models::{JournalEntry, Project};

/// Render a journal entry to its storage-markup fragment: a level-3
/// heading carrying the timestamp, then the summary paragraph.
pub fn render_journal_entry(entry: &JournalEntry) -> String {
    format!(
        "<h3>{}</h3>\n<p>{}</p>\n",
        entry.timestamp.format("%Y-%m-%d %H:%M"),
        entry.summary
    )
}

/// Render a project's section body to its storage-markup fragment.
///
/// Blocks appear in a fixed order: image embed, status, executive
/// summary, prototypes, supporting work. Optional blocks are emitted
/// only when their field is present and non-empty. Blocks are joined
/// by a blank line.
pub fn render_project(project: &Project) -> String {
    let mut parts = Vec::new();

    if let Some(url) = non_empty(project.image_url.as_deref()) {
        parts.push(format!(
            "<ac:image><ri:url ri:value=\"{}\" /></ac:image>",
            url
        ));
    }

    parts.push(format!(
        "<p><strong>Classification:</strong> {}<br />\n<strong>Status:</strong> {}<br />\n<strong>Next Steps:</strong> {}</p>\n",
        project.classification.as_str(),
        project.status,
        project.next_steps
    ));

    parts.push(format!(
        "<h4>Executive Summary</h4>\n<p>{}</p>\n",
        project.executive_summary
    ));

    if let Some(prototypes) = non_empty(project.prototypes.as_deref()) {
        parts.push(format!("<h4>Prototypes</h4>\n<p>{}</p>\n", prototypes));
    }

    if let Some(work) = non_empty(project.supporting_work.as_deref()) {
        parts.push(format!(
            "<h4>Simulation, White Paper, and Supporting Work Products</h4>\n<p>{}</p>\n",
            work
        ));
    }

    parts.join("\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
