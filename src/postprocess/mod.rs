//! Turns a raw completion into a `{reasoning, reply}` pair.
//!
//! The provider is instructed to emit `<think>reasoning</think>reply`. The
//! raw text is scanned left to right in two states: reasoning until the first
//! closing tag `</name>` (name = one or more word characters), reply after it.
//! The banned-term guardrail runs before segmentation and covers the whole
//! text, reasoning included.

use log::{ debug, warn };

use crate::config::persona::{ DEFLECTION_REPLY, GUARDRAIL_REASONING };
use crate::guardrail::BannedTermFilter;
use crate::models::chat::ProcessedResponse;

#[derive(Debug, Clone)]
pub struct ResponseProcessor {
    filter: BannedTermFilter,
    deflection_reply: String,
    deflection_reasoning: String,
}

impl Default for ResponseProcessor {
    fn default() -> Self {
        Self::new(BannedTermFilter::default())
    }
}

impl ResponseProcessor {
    pub fn new(filter: BannedTermFilter) -> Self {
        Self {
            filter,
            deflection_reply: DEFLECTION_REPLY.to_string(),
            deflection_reasoning: GUARDRAIL_REASONING.to_string(),
        }
    }

    pub fn filter(&self) -> &BannedTermFilter {
        &self.filter
    }

    pub fn process(&self, raw_reply: &str) -> ProcessedResponse {
        if let Some(term) = self.filter.first_match(raw_reply) {
            warn!("Guardrail triggered on banned term '{}'; overriding with deflection reply", term);
            return ProcessedResponse {
                reply: self.deflection_reply.clone(),
                reasoning: self.deflection_reasoning.clone(),
            };
        }

        let processed = split_reasoning(raw_reply);
        if processed.reasoning.is_empty() && processed.reply == raw_reply {
            debug!("No reasoning delimiter found; returning raw reply");
        }
        processed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    InReasoning,
    InReply {
        reasoning_end: usize,
        reply_start: usize,
    },
}

/// Splits `raw` at its first closing tag. Without one, the whole text is the
/// reply and reasoning is empty.
pub fn split_reasoning(raw: &str) -> ProcessedResponse {
    let mut state = ScanState::InReasoning;

    for (idx, ch) in raw.char_indices() {
        if ch != '<' {
            continue;
        }
        if let Some(len) = closing_tag_len(&raw[idx..]) {
            state = ScanState::InReply {
                reasoning_end: idx,
                reply_start: idx + len,
            };
            break;
        }
    }

    match state {
        ScanState::InReasoning =>
            ProcessedResponse {
                reply: raw.to_string(),
                reasoning: String::new(),
            },
        ScanState::InReply { reasoning_end, reply_start } => {
            let reasoning = strip_leading_opening_tag(raw[..reasoning_end].trim());
            ProcessedResponse {
                reply: raw[reply_start..].trim().to_string(),
                reasoning: reasoning.to_string(),
            }
        }
    }
}

// Strips at most one opening tag and the whitespace right after it.
fn strip_leading_opening_tag(reasoning: &str) -> &str {
    match opening_tag_len(reasoning) {
        Some(len) => reasoning[len..].trim_start(),
        None => reasoning,
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Length in bytes of a `</name>` token at the start of `s`.
fn closing_tag_len(s: &str) -> Option<usize> {
    s.strip_prefix("</").and_then(tag_body_len).map(|len| len + 2)
}

/// Length in bytes of a `<name>` token at the start of `s`.
fn opening_tag_len(s: &str) -> Option<usize> {
    s.strip_prefix('<').and_then(tag_body_len).map(|len| len + 1)
}

// `name>` where name is one or more word characters.
fn tag_body_len(s: &str) -> Option<usize> {
    let name_len: usize = s
        .chars()
        .take_while(|c| is_word_char(*c))
        .map(char::len_utf8)
        .sum();
    if name_len == 0 || !s[name_len..].starts_with('>') {
        return None;
    }
    Some(name_len + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(reasoning: &str, reply: &str) -> ProcessedResponse {
        ProcessedResponse { reasoning: reasoning.to_string(), reply: reply.to_string() }
    }

    #[test]
    fn splits_clean_reasoning_and_reply() {
        assert_eq!(
            split_reasoning("<think>reasoning text</think>final text"),
            processed("reasoning text", "final text")
        );
    }

    #[test]
    fn plain_reply_passes_through_unchanged() {
        assert_eq!(split_reasoning("just a plain reply"), processed("", "just a plain reply"));
        assert_eq!(split_reasoning("  padded  "), processed("", "  padded  "));
    }

    #[test]
    fn strips_leading_opening_tag() {
        assert_eq!(split_reasoning("<think>step one</think>hello"), processed("step one", "hello"));
    }

    #[test]
    fn trims_whitespace_around_both_segments() {
        assert_eq!(split_reasoning("<think>  r  </think>   hi  "), processed("r", "hi"));
    }

    #[test]
    fn splits_at_first_closing_tag_only() {
        assert_eq!(split_reasoning("<a>x</a>rest</b>more"), processed("x", "rest</b>more"));
    }

    #[test]
    fn reasoning_without_opening_tag_is_kept() {
        assert_eq!(split_reasoning("plan it out</think>Sure!"), processed("plan it out", "Sure!"));
    }

    #[test]
    fn strips_only_one_opening_tag() {
        assert_eq!(
            split_reasoning("<think><think>nested</think>ok"),
            processed("<think>nested", "ok")
        );
    }

    #[test]
    fn empty_reasoning_block() {
        assert_eq!(split_reasoning("<think></think>\nHi there"), processed("", "Hi there"));
    }

    #[test]
    fn ignores_tag_lookalikes() {
        assert_eq!(split_reasoning("a < b and </ c> and </>"), processed("", "a < b and </ c> and </>"));
        assert_eq!(split_reasoning("1 </2>x"), processed("1", "x"));
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(split_reasoning("<think>café ☕</think>voilà"), processed("café ☕", "voilà"));
        assert_eq!(split_reasoning("<razón>sí</razón>ok"), processed("sí", "ok"));
    }

    #[test]
    fn guardrail_overrides_segmentation() {
        let processor = ResponseProcessor::default();
        let cases = [
            "<think>I am DeepSeek</think>Hello there",
            "<think>fine</think>Made by DEEPSEEK",
            "deepseek",
            "no tags but google is here",
        ];
        for raw in cases {
            assert_eq!(processor.process(raw), processed(GUARDRAIL_REASONING, DEFLECTION_REPLY));
        }
    }

    #[test]
    fn clean_output_is_segmented() {
        let processor = ResponseProcessor::default();
        assert_eq!(
            processor.process("<think>Check Section 2.2.</think>The Aura lasts 24 hours in total."),
            processed("Check Section 2.2.", "The Aura lasts 24 hours in total.")
        );
    }

    #[test]
    fn custom_filter_is_applied() {
        let processor = ResponseProcessor::new(BannedTermFilter::from_terms(["acme"]));
        assert_eq!(processor.process("Acme rocks"), processed(GUARDRAIL_REASONING, DEFLECTION_REPLY));
        assert_eq!(processor.process("google it"), processed("", "google it"));
    }
}
