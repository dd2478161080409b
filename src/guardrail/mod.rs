//! Banned-term guardrail.
//!
//! Terms are matched as plain case-insensitive substrings with no word
//! boundary check, so "Googled" matches "google".

/// Built-in banned terms in scan priority order.
pub const DEFAULT_BANNED_TERMS: [&str; 6] = [
    "deepseek",
    "gemini",
    "chatgpt",
    "openai",
    "google",
    "china",
];

#[derive(Debug, Clone)]
pub struct BannedTermFilter {
    terms: Vec<String>,
}

impl Default for BannedTermFilter {
    fn default() -> Self {
        Self::from_terms(DEFAULT_BANNED_TERMS)
    }
}

impl BannedTermFilter {
    /// Builds a filter from terms in priority order. Terms are lowercased and
    /// blank entries dropped.
    pub fn from_terms<I, S>(terms: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns the first term, in priority order, found anywhere in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| lowered.contains(term.as_str()))
            .map(String::as_str)
    }
}
