use serde::{Deserialize, Serialize};

/// A named unit of work tracked on the status page.
///
/// Projects are identified by `title`: the editor matches it as a
/// case-insensitive substring against page headings, so a project keeps
/// its identity even when the heading carries extra text or different
/// casing. All free-text fields are rendered into the project's section
/// body; the optional ones each contribute a block only when non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique key for matching against page headings.
    pub title: String,
    pub classification: Classification,
    /// One-line status description.
    pub status: String,
    /// One-line next-steps description.
    pub next_steps: String,
    /// What the project explores and why it matters.
    pub executive_summary: String,
    /// Physical or software prototypes, if any.
    pub prototypes: Option<String>,
    /// Simulation, white papers, and other supporting work products.
    pub supporting_work: Option<String>,
    /// Optional image URL rendered above the status block.
    pub image_url: Option<String>,
}

/// Classification level of a project.
///
/// This is a closed set; input that names no variant falls back to
/// `Exploratory` at the extraction boundary rather than failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Classification {
    Moonshot,
    Core,
    Exploratory,
    Maintenance,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moonshot => "Moonshot",
            Self::Core => "Core",
            Self::Exploratory => "Exploratory",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Moonshot" => Some(Self::Moonshot),
            "Core" => Some(Self::Core),
            "Exploratory" => Some(Self::Exploratory),
            "Maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}
