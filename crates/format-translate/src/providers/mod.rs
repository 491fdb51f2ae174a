//! Translation provider adapters.
//!
//! Each adapter performs one HTTP call and validates the response shape.
//! Anything unexpected becomes `Error::Provider` so the engine moves on.

mod deepl;
mod google;
mod libre;
mod mymemory;

pub use deepl::DeepLProvider;
pub use google::GoogleProvider;
pub use libre::LibreTranslateProvider;
pub use mymemory::MyMemoryProvider;

use format_core::{Error, Result};

fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Reject non-2xx responses before decoding.
fn ensure_success(provider: &str, response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Provider(format!("{} returned {}", provider, status)))
    }
}

fn empty_translation(provider: &str) -> Error {
    Error::Provider(format!("{} returned no translated text", provider))
}
