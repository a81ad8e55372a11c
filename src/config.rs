//! Local configuration: which pages are known and how they are laid out.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "scribe";
const CONFIG_FILE: &str = "config.json";

/// Layout of one configured page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub url: String,
    pub page_id: String,
    pub page_title: String,
    /// Heading under which journal entries are added. Empty when the
    /// page has no journal section.
    pub journal_heading: String,
    /// Headings under which projects live, in priority order. New
    /// projects are created under the first one that matches.
    #[serde(default)]
    pub project_headings: Vec<String>,
}

/// Global configuration, keyed by page URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScribeConfig {
    pub default_page_url: Option<String>,
    #[serde(default)]
    pub pages: BTreeMap<String, PageConfig>,
}

impl ScribeConfig {
    /// Load configuration from the user's config directory. A missing
    /// file yields the defaults; an unreadable one is an error so a
    /// later save cannot silently wipe it.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Configuration for a specific page URL.
    pub fn page(&self, url: &str) -> Option<&PageConfig> {
        self.pages.get(url)
    }

    /// Add or replace a page's configuration. The first configured
    /// page becomes the default.
    pub fn set_page(&mut self, page: PageConfig) {
        if self.default_page_url.is_none() {
            self.default_page_url = Some(page.url.clone());
        }
        self.pages.insert(page.url.clone(), page);
    }
}

/// Path of the configuration file.
pub fn config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}
