use serde::Serialize;

use super::{keywords::KeywordSet, normalize::normalize};

pub const VALIDATION_THRESHOLD: f64 = 0.2;
const MIN_MATCHED_KEYWORDS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub is_match: bool,
    pub matched_words: Vec<String>,
}

/// Decides whether a search snippet talks about the company behind `keywords`.
///
/// Keywords are tested by substring containment in the normalized snippet, so
/// short keywords also hit inside longer words. A snippet matches when the
/// matched share reaches `threshold`, or when at least two keywords matched.
pub fn validate(keywords: &KeywordSet, snippet: &str, threshold: f64) -> ValidationOutcome {
    if keywords.is_empty() {
        return ValidationOutcome::default();
    }
    let snippet = normalize(snippet);
    if snippet.is_empty() {
        return ValidationOutcome::default();
    }

    let matched_words: Vec<String> = keywords
        .iter()
        .filter(|keyword| snippet.contains(keyword))
        .map(str::to_string)
        .collect();

    if matched_words.is_empty() {
        return ValidationOutcome::default();
    }

    let match_ratio = matched_words.len() as f64 / keywords.len() as f64;
    ValidationOutcome {
        is_match: match_ratio >= threshold || matched_words.len() >= MIN_MATCHED_KEYWORDS,
        matched_words,
    }
}
