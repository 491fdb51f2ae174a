//! HTML results page scraping.

use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use format_core::{Error, Result, SearchCategory, SearchResult};

/// Ad redirect links carry this path and are never real results.
const AD_REDIRECT_MARKER: &str = "duckduckgo.com/y.js";

const CODE_HOSTS: &[&str] = &["github.com", "stackoverflow.com"];
const NEWS_MARKERS: &[&str] = &["news", "bbc", "cnn"];

struct Selectors {
    result: Selector,
    title: Selector,
    snippet: Selector,
    url: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            result: parse_selector(".result")?,
            title: parse_selector(".result__title a")?,
            snippet: parse_selector(".result__snippet")?,
            url: parse_selector(".result__url")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Search(format!("invalid selector {}: {}", css, e)))
}

/// Trimmed text content of the first match.
fn first_text(el: &ElementRef<'_>, selector: &Selector) -> String {
    el.select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Prefix scheme-less display URLs with `https://`.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

/// Classify a result by its URL.
pub fn classify(url: &str) -> SearchCategory {
    let host = host_of(url).to_lowercase();
    let is_code = CODE_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{}", h)));
    if is_code {
        return SearchCategory::Code;
    }

    let lower = url.to_lowercase();
    if NEWS_MARKERS.iter().any(|m| lower.contains(m)) {
        return SearchCategory::News;
    }
    SearchCategory::Web
}

/// Extract at most `max` results from a results page, in page order.
///
/// Blocks without a title or snippet and ad redirects are skipped.
pub fn parse_results(html: &str, max: usize) -> Result<Vec<SearchResult>> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(html);

    let mut results = Vec::new();
    for block in document.select(&selectors.result) {
        if results.len() >= max {
            break;
        }

        let title = first_text(&block, &selectors.title);
        let description = first_text(&block, &selectors.snippet);
        let url = normalize_url(&first_text(&block, &selectors.url));

        if title.is_empty() || description.is_empty() || url.contains(AD_REDIRECT_MARKER) {
            trace!(subsystem = "search", title = %title, url = %url, "Skipping result block");
            continue;
        }

        results.push(SearchResult {
            category: classify(&url),
            title,
            url,
            description,
        });
    }

    Ok(results)
}
