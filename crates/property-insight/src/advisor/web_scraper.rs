use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Node};
use tracing::info;

use super::tools::ToolDefinition;

pub const WEB_SCRAPER_TOOL: &str = "web_scraper";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("http client unavailable: {0}")]
    Client(#[source] reqwest::Error),
}

pub fn web_scraper_tool() -> ToolDefinition {
    ToolDefinition::with_string_argument(
        WEB_SCRAPER_TOOL,
        "Fetches a web page and returns its visible text content",
        "url",
        "Absolute URL of the page to scrape",
    )
}

/// Fetches pages and reduces them to readable text.
#[derive(Clone)]
pub struct WebScraper {
    http: Client,
}

impl WebScraper {
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self, ScrapeError> {
        let http = Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .timeout(timeout)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { http })
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, ScrapeError> {
        let request_error = |source| ScrapeError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.http.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        let text = extract_page_text(&body);
        info!(%url, chars = text.len(), "scraped page text");
        Ok(text)
    }
}

/// Visible text of an HTML document with whitespace collapsed.
///
/// Script and style contents are dropped. Each line is trimmed and split on
/// runs of two spaces, and the non-empty pieces are joined with single spaces.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| matches!(element.name(), "script" | "style"))
        });
        if !hidden {
            raw.push_str(text);
        }
    }

    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
