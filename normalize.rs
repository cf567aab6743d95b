use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Token;

// Unicode punctuation and symbols; covers everything in ASCII punctuation too
static PUNCT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{P}\p{S}]").unwrap());

/// Remove punctuation and symbol characters, leaving whitespace in place
pub fn remove_punctuation(text: &str) -> String {
    PUNCT_REGEX.replace_all(text, "").into_owned()
}

/// Split raw text into lowercase tokens.
///
/// Punctuation is removed before splitting, so contractions collapse into a
/// single token (`don't` -> `dont`) and free-standing dashes vanish.
pub fn tokenize(text: &str) -> Vec<Token> {
    remove_punctuation(text)
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}
