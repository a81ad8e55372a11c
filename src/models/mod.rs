//! Domain models for Scribe.
//!
//! # Core Concepts
//!
//! - [`JournalEntry`]: A dated record of work done over some period,
//!   appended to the page's journal section.
//! - [`Project`]: A named unit of work with a classification, status,
//!   and summary, rendered as its own section on the page.
//! - [`UpdatePlan`]: The full set of entries and project changes
//!   extracted from one conversation, split into updates (sections
//!   that already exist) and creations (sections that do not).

mod journal;
mod project;
mod update;

pub use journal::*;
pub use project::*;
pub use update::*;
