//! Parsing of the model's extraction output into an update plan.

use serde::Deserialize;

use crate::models::{Classification, JournalEntry, Project, UpdatePlan};

/// Wire shape of the extraction response.
#[derive(Debug, Deserialize)]
struct ExtractedUpdate {
    journal_entry: Option<ExtractedJournalEntry>,
    #[serde(default)]
    projects_to_update: Vec<ExtractedProject>,
    #[serde(default)]
    projects_to_create: Vec<ExtractedProject>,
}

#[derive(Debug, Deserialize)]
struct ExtractedJournalEntry {
    #[serde(default = "default_period")]
    period_description: String,
    summary: String,
}

fn default_period() -> String {
    "today".to_string()
}

#[derive(Debug, Deserialize)]
struct ExtractedProject {
    title: String,
    classification: Option<String>,
    status: String,
    next_steps: String,
    executive_summary: String,
    #[serde(default)]
    prototypes: Option<String>,
    #[serde(default)]
    supporting_work: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl From<ExtractedProject> for Project {
    fn from(raw: ExtractedProject) -> Self {
        // Unknown classifications degrade to Exploratory instead of failing.
        let classification = raw
            .classification
            .as_deref()
            .and_then(Classification::from_str)
            .unwrap_or(Classification::Exploratory);
        Self {
            title: raw.title,
            classification,
            status: raw.status,
            next_steps: raw.next_steps,
            executive_summary: raw.executive_summary,
            prototypes: raw.prototypes,
            supporting_work: raw.supporting_work,
            image_url: raw.image_url,
        }
    }
}

/// Parse the raw extraction response into an update plan.
///
/// The model wraps its JSON in markdown code fences often enough that
/// they are stripped up front. A project missing a required field is a
/// parse error; the caller reports it as an extraction failure and no
/// page edit is attempted for the response.
pub fn parse_update_plan(raw: &str) -> Result<UpdatePlan, serde_json::Error> {
    let stripped = strip_code_fences(raw);
    let extracted: ExtractedUpdate = serde_json::from_str(stripped.trim())?;

    let mut plan = UpdatePlan::default();
    if let Some(entry) = extracted.journal_entry {
        plan.journal_entries
            .push(JournalEntry::new(entry.period_description, entry.summary));
    }
    plan.projects_to_update = extracted
        .projects_to_update
        .into_iter()
        .map(Project::from)
        .collect();
    plan.projects_to_create = extracted
        .projects_to_create
        .into_iter()
        .map(Project::from)
        .collect();
    Ok(plan)
}

/// Cut the body out of a fenced code block, if there is one.
fn strip_code_fences(raw: &str) -> &str {
    if let Some((_, after)) = raw.split_once("```json") {
        after.split_once("```").map_or(after, |(body, _)| body)
    } else if let Some((_, after)) = raw.split_once("```") {
        after.split_once("```").map_or(after, |(body, _)| body)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```").trim(), "{}");
    }

    #[test]
    fn strips_bare_fences() {
        assert_eq!(strip_code_fences("text\n```\n{}\n```").trim(), "{}");
    }

    #[test]
    fn passes_unfenced_text_through() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn tolerates_a_missing_closing_fence() {
        assert_eq!(strip_code_fences("```json\n{}").trim(), "{}");
    }
}
