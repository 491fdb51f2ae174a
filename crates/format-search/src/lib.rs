//! # format-search
//!
//! Live web search for the FormAT assistant.
//!
//! Fetches the HTML results page of a DuckDuckGo-compatible endpoint,
//! scrapes result blocks, and classifies each hit by its URL. Every failure
//! path yields an empty result list so callers can fall through to other
//! answer sources.

pub mod client;
pub mod config;
pub mod parser;

pub use client::WebSearchClient;
pub use config::SearchConfig;
pub use parser::{classify, normalize_url, parse_results};
