use serde::{Deserialize, Serialize};

use super::{JournalEntry, Project};

/// Everything extracted from one conversation, ready to be pushed.
///
/// Projects are split by whether a matching section already exists on
/// the page: updates replace a section in place, creations append or
/// nest a new one. The split is decided during extraction against the
/// list of titles read from the page, not at push time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub journal_entries: Vec<JournalEntry>,
    pub projects_to_update: Vec<Project>,
    pub projects_to_create: Vec<Project>,
}

impl UpdatePlan {
    /// True when extraction produced nothing to push.
    pub fn is_empty(&self) -> bool {
        self.journal_entries.is_empty()
            && self.projects_to_update.is_empty()
            && self.projects_to_create.is_empty()
    }
}
