//! HTTP client for the Confluence REST API.
//!
//! Configuration is via environment variables:
//! - `CONFLUENCE_URL` - Base URL of the Confluence instance
//! - `CONFLUENCE_TOKEN` - Personal access token, sent as a bearer token
//!
//! The client owns the fetch-transform-write cycle: every push fetches
//! a fresh body, hands it to the editor, and writes the full
//! replacement back with a bumped version number. Edits are applied
//! one at a time so each observes the previous one's result.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::editor::{self, Heading};
use crate::models::{JournalEntry, Project};

static DISPLAY_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/display/([^/]+)/(.+)$").unwrap());

/// Confluence client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("CONFLUENCE_URL and CONFLUENCE_TOKEN must be set")]
    MissingCredentials,

    #[error("Could not parse page URL: {0}")]
    InvalidUrl(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: token missing or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

/// A page's space key and title, decomposed from a display URL.
///
/// Display URLs look like `https://wiki.example.net/display/SPACE/Page+Title`
/// with `+` standing for spaces and percent escapes for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocator {
    pub space_key: String,
    pub title: String,
}

impl PageLocator {
    /// Decompose a display URL into space key and decoded title.
    pub fn parse(page_url: &str) -> Result<Self, ClientError> {
        let caps = DISPLAY_URL_RE
            .captures(page_url)
            .ok_or_else(|| ClientError::InvalidUrl(page_url.to_string()))?;
        let space_key = caps[1].to_string();
        let title = percent_decode(&caps[2].replace('+', " "));
        Ok(Self { space_key, title })
    }
}

// ============================================================
// Wire Types
// ============================================================

/// A wiki page with its storage-format body.
#[derive(Debug, Clone)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub version: i64,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    results: Vec<PageDto>,
}

#[derive(Debug, Deserialize)]
struct PageDto {
    id: String,
    title: String,
    version: Option<VersionDto>,
    body: Option<BodyDto>,
}

#[derive(Debug, Deserialize)]
struct VersionDto {
    number: i64,
}

#[derive(Debug, Deserialize)]
struct BodyDto {
    storage: StorageDto,
}

#[derive(Debug, Deserialize)]
struct StorageDto {
    value: String,
}

impl From<PageDto> for Page {
    fn from(dto: PageDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            version: dto.version.map_or(1, |v| v.number),
            body: dto.body.map(|b| b.storage.value).unwrap_or_default(),
        }
    }
}

// ============================================================
// Client
// ============================================================

/// Client for reading and writing wiki pages.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    base_url: String,
    token: String,
    client: Client,
}

impl ConfluenceClient {
    /// Create client from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url =
            std::env::var("CONFLUENCE_URL").map_err(|_| ClientError::MissingCredentials)?;
        let token = std::env::var("CONFLUENCE_TOKEN").map_err(|_| ClientError::MissingCredentials)?;
        Ok(Self::new(base_url, token))
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Build a request with the auth header attached.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url).bearer_auth(&self.token)
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::PageNotFound(body)),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    // ============================================================
    // Page Operations
    // ============================================================

    /// Fetch a page by its human-readable display URL.
    pub async fn page_by_url(&self, page_url: &str) -> Result<Page, ClientError> {
        let locator = PageLocator::parse(page_url)?;
        let path = format!(
            "/rest/api/content?spaceKey={}&title={}&expand=body.storage,version",
            encode_query(&locator.space_key),
            encode_query(&locator.title)
        );
        let response = self.request(reqwest::Method::GET, &path).send().await?;
        let results: SearchResults = self.handle_response(response).await?;

        results
            .results
            .into_iter()
            .next()
            .map(Page::from)
            .ok_or_else(|| {
                ClientError::PageNotFound(format!(
                    "{} in space {}",
                    locator.title, locator.space_key
                ))
            })
    }

    /// Fetch a page by its ID.
    pub async fn page_by_id(&self, page_id: &str) -> Result<Page, ClientError> {
        let path = format!("/rest/api/content/{}?expand=body.storage,version", page_id);
        let response = self.request(reqwest::Method::GET, &path).send().await?;
        let dto: PageDto = self.handle_response(response).await?;
        Ok(dto.into())
    }

    /// Write a full replacement body, bumping the version number.
    pub async fn update_page(&self, page: &Page, new_body: &str) -> Result<(), ClientError> {
        let path = format!("/rest/api/content/{}", page.id);
        let payload = serde_json::json!({
            "id": page.id,
            "type": "page",
            "title": page.title,
            "version": { "number": page.version + 1 },
            "body": {
                "storage": {
                    "value": new_body,
                    "representation": "storage"
                }
            }
        });
        let response = self
            .request(reqwest::Method::PUT, &path)
            .json(&payload)
            .send()
            .await?;
        // The response echoes the updated page; only success matters here.
        let _: serde_json::Value = self.handle_response(response).await?;
        tracing::info!("Updated page {} to version {}", page.id, page.version + 1);
        Ok(())
    }

    // ============================================================
    // Editor Round-Trips
    // ============================================================

    /// Fetch a page, splice a journal entry in, and write it back.
    pub async fn push_journal_entry(
        &self,
        page_id: &str,
        entry: &JournalEntry,
        journal_heading: Option<&str>,
    ) -> Result<(), ClientError> {
        let page = self.page_by_id(page_id).await?;
        let new_body = editor::insert_journal_entry(&page.body, entry, journal_heading);
        self.update_page(&page, &new_body).await
    }

    /// Fetch a page, insert or replace a project section, and write it back.
    pub async fn push_project(
        &self,
        page_id: &str,
        project: &Project,
        candidate_headings: Option<&[String]>,
    ) -> Result<(), ClientError> {
        let page = self.page_by_id(page_id).await?;
        let new_body = editor::upsert_project(&page.body, project, candidate_headings);
        self.update_page(&page, &new_body).await
    }

    /// Project titles currently on a page.
    pub async fn list_existing_projects(&self, page_id: &str) -> Result<Vec<String>, ClientError> {
        let page = self.page_by_id(page_id).await?;
        Ok(editor::list_project_titles(&page.body))
    }

    /// All headings on a page, for the configuration wizard.
    pub async fn page_headings(&self, page_id: &str) -> Result<Vec<Heading>, ClientError> {
        let page = self.page_by_id(page_id).await?;
        Ok(editor::headings(&page.body).collect())
    }
}

/// Percent-encode a value for use in a query string.
fn encode_query(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '?' => "%3F".to_string(),
            '#' => "%23".to_string(),
            '%' => "%25".to_string(),
            '+' => "%2B".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Decode percent escapes, leaving malformed escapes untouched.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_urls() {
        let locator =
            PageLocator::parse("https://wiki.example.net/display/DARK/Moonshot+Journal").unwrap();
        assert_eq!(locator.space_key, "DARK");
        assert_eq!(locator.title, "Moonshot Journal");
    }

    #[test]
    fn decodes_percent_escapes_in_titles() {
        let locator =
            PageLocator::parse("https://wiki.example.net/display/OPS/Rich%27s+Journal").unwrap();
        assert_eq!(locator.title, "Rich's Journal");
    }

    #[test]
    fn rejects_urls_without_display_segment() {
        assert!(PageLocator::parse("https://wiki.example.net/pages/12345").is_err());
    }

    #[test]
    fn leaves_malformed_escapes_untouched() {
        assert_eq!(percent_decode("50%+done"), "50%+done");
    }

    #[test]
    fn encodes_query_values() {
        assert_eq!(encode_query("Moonshot Journal"), "Moonshot%20Journal");
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
    }
}
