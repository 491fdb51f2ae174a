//! # format-ai
//!
//! The self-training assistant: a weighted pattern knowledge store consulted
//! after live search, with a background trainer that learns entries from
//! unanswered queries and decays poorly rated ones. Also renders
//! template-based content (blog posts, emails, code snippets and so on).

pub mod assistant;
pub mod cache;
pub mod generator;
pub mod matcher;
pub mod responses;
pub mod seed;
pub mod trainer;

pub use assistant::QueryAssistant;
pub use cache::KnowledgeCache;
pub use generator::ContentType;
pub use matcher::{best_match, CompiledEntry, PatternMatcher};
pub use trainer::{extract_keywords, KnowledgeTrainer, TrainingReport};
