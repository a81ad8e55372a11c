use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A dated record summarizing work done over some period.
///
/// Entries are immutable once captured: the conversation layer produces
/// them during extraction and the editor renders them into the page.
/// The timestamp is wall-clock local time because it is rendered for a
/// human reader of the journal page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the entry was captured. Defaults to now.
    pub timestamp: DateTime<Local>,
    /// Free-text label of the covered span (e.g., "today", "this week").
    pub period_description: String,
    /// Summary of the work done in that period.
    pub summary: String,
}

impl JournalEntry {
    /// Create an entry captured now.
    pub fn new(period_description: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            period_description: period_description.into(),
            summary: summary.into(),
        }
    }
}
