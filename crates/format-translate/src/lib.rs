//! # format-translate
//!
//! Translation for the FormAT assistant through a sequential chain of
//! public providers. The first provider that returns a usable translation
//! wins; the rest are never called.
//!
//! ```rust,ignore
//! use format_translate::TranslationEngine;
//!
//! let engine = TranslationEngine::from_env()?;
//! let outcome = engine.translate("good morning", "es").await;
//! println!("{} (via {:?})", outcome.translation, outcome.sources);
//! ```

pub mod config;
pub mod engine;
pub mod languages;
pub mod providers;

pub use config::TranslateConfig;
pub use engine::TranslationEngine;
pub use languages::SUPPORTED_LANGUAGES;
