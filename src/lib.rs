//! Scribe turns free-form chat about recent work into structured
//! journal and project updates, then writes them into a wiki page by
//! locating and rewriting sections of its storage markup.
//!
//! The crate splits into a pure editing core and thin collaborators
//! around it:
//!
//! - [`editor`]: locates headings, computes sections, and splices
//!   rendered fragments into a document body. Pure functions, no I/O.
//! - [`models`]: journal entries, projects, and the extracted plan.
//! - [`conversation`]: the chat and extraction flow against the
//!   Messages API.
//! - [`confluence`]: fetches page bodies and writes replacements back.
//! - [`config`]: per-page layout configuration on disk.
//! - [`cli`]: the interactive chat loop and configuration wizard.

pub mod cli;
pub mod config;
pub mod confluence;
pub mod conversation;
pub mod editor;
pub mod models;
