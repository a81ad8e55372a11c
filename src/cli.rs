//! Interactive command-line flows: the chat loop and the page
//! configuration wizard.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{self, PageConfig, ScribeConfig};
use crate::confluence::ConfluenceClient;
use crate::conversation::{AnthropicClient, Conversation};
use crate::editor::{self, Heading};
use crate::models::UpdatePlan;

/// Print an assistant message with its speaker label.
fn print_assistant(message: &str) {
    println!("\n{}", "Scribe:".bright_blue().bold());
    println!("{}", message);
}

/// Prompt for one line of input.
fn prompt(label: &str) -> Result<String> {
    print!("{} ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask a yes/no question. Anything but an explicit yes counts as no.
fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Run the interactive chat flow against the given or default page.
pub async fn run_chat(url: Option<String>) -> Result<()> {
    println!(
        "\n{} - your work tracking assistant\n",
        "Welcome to Scribe".bold()
    );

    let mut config = ScribeConfig::load()?;

    if config.default_page_url.is_none() {
        println!("{}", "No page configured yet.".yellow());
        println!("Run {} to set up your wiki page.\n", "scribe configure".bold());

        if !confirm("Would you like to configure now?")? {
            return Ok(());
        }
        run_configure(None).await?;
        config = ScribeConfig::load()?;
    }

    let page_url = url
        .or_else(|| config.default_page_url.clone())
        .context("No page URL given and no default configured")?;
    let page_config = config
        .page(&page_url)
        .cloned()
        .with_context(|| format!("Page not configured: {} (run `scribe configure`)", page_url))?;

    // The chat can still run without a wiki connection; the plan is
    // printed instead of pushed.
    println!("{}", "Connecting to the wiki...".dimmed());
    let (confluence, existing_projects) = match connect(&page_config).await {
        Ok((client, projects)) => {
            println!(
                "{} Found {} existing projects.\n",
                "Connected!".green(),
                projects.len()
            );
            (Some(client), projects)
        }
        Err(e) => {
            println!("{} {}", "Error connecting to the wiki:".red(), e);
            println!("{}\n", "Continuing without a wiki connection...".yellow());
            (None, Vec::new())
        }
    };

    let client = AnthropicClient::from_env()?;
    let mut conversation = Conversation::new(client, existing_projects);

    print_assistant(
        "Hello! I'm here to help you track your work and update your status page. \
         What have you been working on?",
    );

    loop {
        let input = prompt(&format!("\n{}", "You:".green().bold()))?;
        if input.is_empty() {
            continue;
        }

        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("\n{}", "Goodbye!".dimmed());
            break;
        }

        if matches!(input.to_lowercase().as_str(), "done" | "finish" | "generate") {
            println!("\n{}", "Analyzing conversation...".dimmed());
            if let Err(e) = conversation.extract().await {
                println!("{} {}", "Error during extraction:".red(), e);
                print_assistant(
                    "I had trouble understanding our conversation. \
                     Could you summarize the key points again?",
                );
                continue;
            }

            println!("\n{}", "Here's what I'll generate:".bold());
            println!("{}\n", conversation.summary());

            if !confirm("Does this look correct?")? {
                print_assistant(
                    "No problem! Let's continue our conversation. \
                     Tell me more about your work, or correct anything I got wrong.",
                );
                continue;
            }

            let plan = conversation.plan().clone();
            match &confluence {
                Some(client) => push_plan(client, &page_config, &plan).await?,
                None => print_plan(&plan),
            }
            break;
        }

        match conversation.chat(&input).await {
            Ok(reply) => print_assistant(&reply),
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }

    Ok(())
}

async fn connect(page: &PageConfig) -> Result<(ConfluenceClient, Vec<String>)> {
    let client = ConfluenceClient::from_env()?;
    let projects = client.list_existing_projects(&page.page_id).await?;
    Ok((client, projects))
}

/// Apply the plan one edit at a time. Every push re-fetches the page,
/// so each edit observes the previous one's result.
async fn push_plan(client: &ConfluenceClient, page: &PageConfig, plan: &UpdatePlan) -> Result<()> {
    println!("\n{}", "Updating the wiki...".dimmed());

    let journal_heading = if page.journal_heading.is_empty() {
        None
    } else {
        Some(page.journal_heading.as_str())
    };
    let candidates = if page.project_headings.is_empty() {
        None
    } else {
        Some(page.project_headings.as_slice())
    };

    for entry in &plan.journal_entries {
        client
            .push_journal_entry(&page.page_id, entry, journal_heading)
            .await?;
        println!("{} Added journal entry", "✓".green());
    }

    for project in &plan.projects_to_update {
        client
            .push_project(&page.page_id, project, candidates)
            .await?;
        println!("{} Updated project: {}", "✓".green(), project.title);
    }

    for project in &plan.projects_to_create {
        client
            .push_project(&page.page_id, project, candidates)
            .await?;
        println!("{} Created project: {}", "✓".green(), project.title);
    }

    println!("\n{} Your page has been updated.", "Done!".green().bold());
    Ok(())
}

/// Show the rendered fragments when no wiki connection is available.
fn print_plan(plan: &UpdatePlan) {
    println!(
        "\n{}",
        "Wiki not connected. Here's the generated content:".yellow()
    );
    for entry in &plan.journal_entries {
        println!("\n--- Journal Entry ---");
        println!("{}", editor::render_journal_entry(entry));
    }
    for project in plan.projects_to_update.iter().chain(&plan.projects_to_create) {
        println!("\n--- {} ---", project.title);
        println!("{}", editor::render_project(project));
    }
}

/// Run the page configuration wizard.
pub async fn run_configure(url: Option<String>) -> Result<()> {
    println!("\n{}\n", "Scribe Configuration".bold());

    let page_url = match url {
        Some(u) => u,
        None => prompt("Enter your wiki page URL:")?,
    };
    if page_url.is_empty() {
        anyhow::bail!("A page URL is required");
    }

    println!("\n{}", "Connecting to the wiki...".dimmed());
    let confluence = ConfluenceClient::from_env()?;

    let page_config = configure_page(&confluence, &page_url).await?;

    let mut config = ScribeConfig::load()?;
    config.set_page(page_config);
    config.save()?;

    println!(
        "\n{} {}",
        "Configuration saved to:".green(),
        config::config_path()?.display()
    );
    println!(
        "\nYou can now run {} to start tracking your work!",
        "scribe".bold()
    );
    Ok(())
}

/// Walk through heading selection for one page.
async fn configure_page(confluence: &ConfluenceClient, page_url: &str) -> Result<PageConfig> {
    println!("\n{} {}\n", "Configuring page:".bold(), page_url);

    let page = confluence.page_by_url(page_url).await?;
    println!("{} {} (ID: {})\n", "Found page:".green(), page.title, page.id);

    let headings = confluence.page_headings(&page.id).await?;
    if headings.is_empty() {
        anyhow::bail!("No headings found on this page; add section headings to it first");
    }

    println!("{}\n", "Headings found on this page:".bold());
    for (i, h) in headings.iter().enumerate() {
        println!("  {:>3}  H{}  {}", i + 1, h.level, h.text);
    }
    println!();

    println!("{}", "Journal Section".bold());
    println!("Which heading marks the section where journal entries should be added?");
    let answer = prompt("Enter the number (or 0 to skip journal entries):")?;
    let journal_heading = match pick_heading(&headings, &answer) {
        Some(text) => {
            println!("{} {}\n", "Journal heading set to:".green(), text);
            text
        }
        None => {
            if answer != "0" && !answer.is_empty() {
                println!(
                    "{}\n",
                    "Invalid selection, journal entries will be prepended to the page.".yellow()
                );
            }
            String::new()
        }
    };

    println!("{}", "Project Sections".bold());
    println!("Which headings contain project entries? (Enter numbers separated by commas)");
    println!("New projects will be created under the first matching heading.");
    let answer = prompt("Enter the numbers (or 0 to skip):")?;
    let mut project_headings = Vec::new();
    if answer != "0" && !answer.is_empty() {
        for part in answer.split(',') {
            if let Some(text) = pick_heading(&headings, part.trim()) {
                project_headings.push(text);
            }
        }
        if project_headings.is_empty() {
            println!(
                "{}\n",
                "Invalid selection, projects will be appended to the page.".yellow()
            );
        } else {
            println!(
                "{} {}\n",
                "Project headings set to:".green(),
                project_headings.join(", ")
            );
        }
    }

    Ok(PageConfig {
        url: page_url.to_string(),
        page_id: page.id,
        page_title: page.title,
        journal_heading,
        project_headings,
    })
}

/// Resolve a 1-based selection against the heading list.
fn pick_heading(headings: &[Heading], answer: &str) -> Option<String> {
    let n: usize = answer.parse().ok()?;
    if n == 0 {
        return None;
    }
    headings.get(n - 1).map(|h| h.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> Heading {
        Heading {
            level,
            text: text.to_string(),
            start: 0,
            end: 0,
        }
    }

    #[test]
    fn pick_heading_is_one_based() {
        let headings = vec![heading(1, "Journal"), heading(2, "Projects")];
        assert_eq!(pick_heading(&headings, "1").as_deref(), Some("Journal"));
        assert_eq!(pick_heading(&headings, "2").as_deref(), Some("Projects"));
    }

    #[test]
    fn pick_heading_rejects_zero_and_garbage() {
        let headings = vec![heading(1, "Journal")];
        assert_eq!(pick_heading(&headings, "0"), None);
        assert_eq!(pick_heading(&headings, "7"), None);
        assert_eq!(pick_heading(&headings, "first"), None);
    }
}
