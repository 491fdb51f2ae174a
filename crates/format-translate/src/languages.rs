//! Supported target languages.

/// Two-letter codes accepted as translation targets.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "ar", "es", "fr", "de", "tr", "ja", "zh", "ko", "ru", "pt", "it", "nl", "pl", "vi", "th",
    "id", "hi", "bn", "pa",
];

/// Lower-case and keep the first two characters (`"EN-us"` → `"en"`).
///
/// Surrounding whitespace is not stripped, so `" es"` is not a valid code.
pub fn normalize(target: &str) -> String {
    target.to_lowercase().chars().take(2).collect()
}

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

/// Comma-separated list used in the unsupported-language message.
pub fn supported_list() -> String {
    SUPPORTED_LANGUAGES.join(", ")
}

/// DeepL target code, if DeepL's free tier handles the language.
pub fn deepl_code(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some("EN-US"),
        "de" => Some("DE"),
        "fr" => Some("FR"),
        "es" => Some("ES"),
        "it" => Some("IT"),
        "ja" => Some("JA"),
        "zh" => Some("ZH"),
        "ru" => Some("RU"),
        "pt" => Some("PT-BR"),
        "nl" => Some("NL"),
        "pl" => Some("PL"),
        _ => None,
    }
}
