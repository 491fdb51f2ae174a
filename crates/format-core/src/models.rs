//! Domain models shared across the assistant crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// KNOWLEDGE
// =============================================================================

/// A stored pattern → response rule.
///
/// `pattern` holds `|`-delimited alternatives, each tried as a
/// case-insensitive regular expression against incoming queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: Uuid,
    pub category: String,
    pub pattern: String,
    pub response: String,
    pub weight: i32,
    pub usage_count: i32,
    pub feedback: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KnowledgeEntry {
    /// Match score: `weight × (1 + usage×0.01) × (1 + feedback×0.05)`.
    pub fn score(&self) -> f64 {
        f64::from(self.weight)
            * (1.0 + f64::from(self.usage_count) * crate::defaults::USAGE_SCORE_FACTOR)
            * (1.0 + f64::from(self.feedback) * crate::defaults::FEEDBACK_SCORE_FACTOR)
    }

    /// Iterate the non-empty pattern alternatives.
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.pattern.split('|').filter(|p| !p.trim().is_empty())
    }
}

/// Request for inserting a knowledge entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewKnowledgeEntry {
    pub category: String,
    pub pattern: String,
    pub response: String,
    pub weight: i32,
}

impl NewKnowledgeEntry {
    pub fn new(
        category: impl Into<String>,
        pattern: impl Into<String>,
        response: impl Into<String>,
        weight: i32,
    ) -> Self {
        Self {
            category: category.into(),
            pattern: pattern.into(),
            response: response.into(),
            weight,
        }
    }

    /// Reject entries that would break store invariants.
    pub fn validate(&self) -> crate::Result<()> {
        if self.category.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "Knowledge category cannot be empty".to_string(),
            ));
        }
        if self.pattern.split('|').all(|p| p.trim().is_empty()) {
            return Err(crate::Error::InvalidInput(
                "Knowledge pattern must contain at least one alternative".to_string(),
            ));
        }
        if self.response.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "Knowledge response cannot be empty".to_string(),
            ));
        }
        if self.weight < 0 {
            return Err(crate::Error::InvalidInput(format!(
                "Knowledge weight must be non-negative, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TRAINING
// =============================================================================

/// Why a training record was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingCategory {
    /// Query answered from the knowledge store.
    Query,
    /// Query matched nothing; mined by the background trainer.
    Unknown,
    /// Templated content was generated.
    Generation,
}

impl TrainingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingCategory::Query => "query",
            TrainingCategory::Unknown => "unknown",
            TrainingCategory::Generation => "generation",
        }
    }
}

impl std::fmt::Display for TrainingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrainingCategory {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(TrainingCategory::Query),
            "unknown" => Ok(TrainingCategory::Unknown),
            "generation" => Ok(TrainingCategory::Generation),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown training category: {}",
                other
            ))),
        }
    }
}

/// One logged query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub id: Uuid,
    pub input: String,
    /// Stored as free text; records written by other tools may carry
    /// categories this crate does not know.
    pub category: String,
    pub actual_output: Option<String>,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

impl TrainingRecord {
    pub fn is_unknown(&self) -> bool {
        self.category == TrainingCategory::Unknown.as_str()
    }
}

// =============================================================================
// WEB SEARCH
// =============================================================================

/// Coarse classification of a search hit by its URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    #[default]
    Web,
    News,
    Code,
}

/// One scraped search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: SearchCategory,
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// A single provider's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
    /// Human-readable provider name, e.g. "Google Translate".
    pub source: String,
    /// Provider confidence in `[0, 1]`.
    pub confidence: f32,
}

/// What the fan-out returns to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    pub translation: String,
    /// Providers whose answer was used. Empty for unsupported or failed
    /// translations.
    pub sources: Vec<String>,
}

// =============================================================================
// HISTORY
// =============================================================================

/// A logged web search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    pub query: String,
    pub summary: String,
    pub results: Vec<SearchResult>,
    pub created_at: DateTime<Utc>,
}

/// Request for logging a web search.
#[derive(Debug, Clone)]
pub struct NewSearchHistory {
    pub user_id: String,
    pub query: String,
    pub summary: String,
    pub results: Vec<SearchResult>,
}

/// A logged question and its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionHistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    pub question: String,
    pub summary: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Request for logging a question.
#[derive(Debug, Clone)]
pub struct NewQuestionHistory {
    pub user_id: String,
    pub question: String,
    pub summary: String,
    pub answer: String,
}
