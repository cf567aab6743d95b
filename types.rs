use std::collections::HashMap;
use serde::Serialize;

/// Lowercased, punctuation-free word
pub type Token = String;

/// Occurrence count per distinct token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<Token, usize>,
}

impl FrequencyTable {
    pub fn get(&self, token: &str) -> Option<usize> {
        self.counts.get(token).copied()
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens that were aggregated
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<HashMap<Token, usize>> for FrequencyTable {
    fn from(counts: HashMap<Token, usize>) -> Self {
        Self { counts }
    }
}

impl FromIterator<(Token, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Token, usize)>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for (token, count) in iter {
            *counts.entry(token).or_insert(0) += count;
        }
        Self { counts }
    }
}

/// One row of the ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedWord {
    pub word: Token,
    pub count: usize,
}

/// Words sorted by count, highest first
pub type RankedList = Vec<RankedWord>;

/// Fetched document after HTML extraction
#[derive(Debug)]
pub struct Document {
    pub url: String,
    pub content_type: Option<String>,
    pub text: String,
}
