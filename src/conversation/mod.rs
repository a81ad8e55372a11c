//! Conversation management for the chat-to-update flow.
//!
//! A [`Conversation`] owns all mutable session state: the transcript,
//! the titles already on the page, and the plan extracted so far. The
//! editor stays stateless and receives plain values from the plan.

mod extract;
mod provider;

pub use extract::parse_update_plan;
pub use provider::{AnthropicClient, ChatMessage, MessageRole};

use thiserror::Error;
use uuid::Uuid;

use crate::models::UpdatePlan;

const CHAT_MAX_TOKENS: u32 = 1024;
const EXTRACTION_MAX_TOKENS: u32 = 2048;

const SYSTEM_PROMPT: &str = "You are Scribe, an assistant that turns conversations about recent work into wiki status updates.

Through natural conversation, work out:
1. What the user has been working on, and over what period (a day, a week, longer)
2. Which existing projects the work belongs to
3. Whether any new projects should be created
4. Accomplishments, current status, and next steps for each project touched

Be friendly and concise. Ask clarifying questions when something is vague, and help the user state their work plainly.

Once enough has been gathered you will generate:
- A journal entry summarizing the period
- Updates to existing projects (classification, status, next steps, executive summary, prototypes, supporting work)
- New project entries where needed

When you believe you have enough for a meaningful journal entry and any relevant project updates, tell the user: \"I think I have enough to work with. Type **done** when you're ready for me to generate your updates, or feel free to add more details.\"

Do not invite \"done\" too early; wait until you have a clear summary of the work and the project context it needs.";

const EXTRACTION_PROMPT: &str = r#"Based on our conversation, extract the following structured information. Return valid JSON only.

{
  "journal_entry": {
    "period_description": "today|this week|etc",
    "summary": "Summary of work done"
  },
  "projects_to_update": [
    {
      "title": "Project Name",
      "classification": "Moonshot|Core|Exploratory|Maintenance",
      "status": "One-line status",
      "next_steps": "One-line next steps",
      "executive_summary": "What and why",
      "prototypes": "Description or null",
      "supporting_work": "Description or null"
    }
  ],
  "projects_to_create": [
    "Same structure as projects_to_update"
  ]
}

Only include projects that were explicitly discussed. If no projects need updating or creating, use empty arrays."#;

/// Errors from the conversation and extraction flow.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("ANTHROPIC_API_KEY must be set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Could not parse extracted update: {0}")]
    Extraction(#[from] serde_json::Error),
}

/// One interactive session with the assistant.
pub struct Conversation {
    client: AnthropicClient,
    messages: Vec<ChatMessage>,
    existing_projects: Vec<String>,
    plan: UpdatePlan,
    session_id: Uuid,
}

impl Conversation {
    /// Start a session seeded with the titles already on the page.
    pub fn new(client: AnthropicClient, existing_projects: Vec<String>) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!("Starting conversation session {}", session_id);
        Self {
            client,
            messages: Vec::new(),
            existing_projects,
            plan: UpdatePlan::default(),
            session_id,
        }
    }

    /// System prompt with the page's existing projects appended.
    fn system_prompt(&self) -> String {
        if self.existing_projects.is_empty() {
            return SYSTEM_PROMPT.to_string();
        }
        let listing = self
            .existing_projects
            .iter()
            .map(|p| format!("- {}", p))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{}\n\nExisting projects on the user's page:\n{}",
            SYSTEM_PROMPT, listing
        )
    }

    /// Send one user message and record both sides of the exchange.
    ///
    /// A failed call leaves the transcript unchanged. The caller keeps
    /// the session alive on errors, and a dangling user turn would make
    /// every later call send two user messages in a row.
    pub async fn chat(&mut self, user_message: &str) -> Result<String, ConversationError> {
        self.messages.push(ChatMessage::user(user_message));
        let result = self
            .client
            .complete(&self.system_prompt(), &self.messages, CHAT_MAX_TOKENS)
            .await;
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                self.messages.pop();
                return Err(e);
            }
        };
        self.messages.push(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    /// Ask the model to distill the transcript into an update plan.
    ///
    /// The extraction request rides on a copy of the transcript and is
    /// not recorded in it, so the chat can continue afterwards.
    pub async fn extract(&mut self) -> Result<&UpdatePlan, ConversationError> {
        let mut extraction_messages = self.messages.clone();
        extraction_messages.push(ChatMessage::user(EXTRACTION_PROMPT));

        let raw = self
            .client
            .complete(
                &self.system_prompt(),
                &extraction_messages,
                EXTRACTION_MAX_TOKENS,
            )
            .await?;

        self.plan = extract::parse_update_plan(&raw)?;
        tracing::info!(
            "Session {} extracted {} journal entries, {} updates, {} new projects",
            self.session_id,
            self.plan.journal_entries.len(),
            self.plan.projects_to_update.len(),
            self.plan.projects_to_create.len()
        );
        Ok(&self.plan)
    }

    /// The plan extracted so far.
    pub fn plan(&self) -> &UpdatePlan {
        &self.plan
    }

    /// Human-readable summary of what will be generated.
    pub fn summary(&self) -> String {
        if self.plan.is_empty() {
            return "No entries to generate.".to_string();
        }

        let mut parts = Vec::new();

        if !self.plan.journal_entries.is_empty() {
            parts.push(format!(
                "Journal Entries: {}",
                self.plan.journal_entries.len()
            ));
            for entry in &self.plan.journal_entries {
                parts.push(format!(
                    "  - {}: {}...",
                    entry.period_description,
                    truncate(&entry.summary, 50)
                ));
            }
        }

        if !self.plan.projects_to_update.is_empty() {
            parts.push(format!(
                "\nProjects to Update: {}",
                self.plan.projects_to_update.len()
            ));
            for project in &self.plan.projects_to_update {
                parts.push(format!("  - {}", project.title));
            }
        }

        if !self.plan.projects_to_create.is_empty() {
            parts.push(format!("\nNew Projects: {}", self.plan.projects_to_create.len()));
            for project in &self.plan.projects_to_create {
                parts.push(format!("  - {}", project.title));
            }
        }

        parts.join("\n")
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
