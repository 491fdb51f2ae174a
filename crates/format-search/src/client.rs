//! HTTP client for the HTML search endpoint.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use format_core::{defaults, Error, Result, SearchResult, WebSearch};

use crate::config::SearchConfig;
use crate::parser::parse_results;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.9";
const SEARCH_REFERER: &str = "https://duckduckgo.com/";

/// Scraping web search client.
#[derive(Clone)]
pub struct WebSearchClient {
    client: Client,
    config: SearchConfig,
}

impl WebSearchClient {
    /// Build a client with the configured timeout.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(SearchConfig::from_env())
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Fetch and parse one results page, surfacing every failure.
    pub async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(self.config.search_url())
            .query(&[("q", query)])
            .header(USER_AGENT, defaults::BROWSER_USER_AGENT)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_EN)
            .header(REFERER, SEARCH_REFERER)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Search(format!("search endpoint returned {}", status)));
        }

        let body = response.text().await?;
        parse_results(&body, self.config.max_results)
    }
}

#[async_trait]
impl WebSearch for WebSearchClient {
    #[instrument(skip(self), fields(subsystem = "search", component = "client"))]
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        let start = Instant::now();
        match self.try_search(query).await {
            Ok(results) => {
                debug!(
                    result_count = results.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Web search completed"
                );
                results
            }
            Err(e) => {
                warn!(
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Web search failed, returning no results"
                );
                Vec::new()
            }
        }
    }
}
