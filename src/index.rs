use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Inverted index: token -> positions of the items containing it
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    index: HashMap<String, BTreeSet<usize>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Insert `position` into the posting list of every token
    pub fn insert(&mut self, position: usize, tokens: &HashSet<String>) {
        for token in tokens {
            self.index
                .entry(token.clone())
                .or_default()
                .insert(position);
        }
    }

    /// Remove `position` from the posting list of every token.
    ///
    /// Posting lists left empty are dropped.
    pub fn remove(&mut self, position: usize, tokens: &HashSet<String>) {
        for token in tokens {
            if let Some(postings) = self.index.get_mut(token.as_str()) {
                postings.remove(&position);
                if postings.is_empty() {
                    self.index.remove(token.as_str());
                }
            }
        }
    }

    /// Get positions containing a token
    pub fn postings(&self, token: &str) -> Option<&BTreeSet<usize>> {
        self.index.get(token)
    }

    /// Number of items containing a token
    pub fn doc_frequency(&self, token: &str) -> usize {
        self.index.get(token).map(|p| p.len()).unwrap_or(0)
    }

    /// Union of the posting lists of `tokens` (OR query)
    pub fn candidates<'a, I>(&self, tokens: I) -> BTreeSet<usize>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut result = BTreeSet::new();
        for token in tokens {
            if let Some(postings) = self.index.get(token.as_str()) {
                result.extend(postings.iter().copied());
            }
        }
        result
    }

    pub fn contains(&self, token: &str, position: usize) -> bool {
        self.index
            .get(token)
            .map_or(false, |postings| postings.contains(&position))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<usize>)> {
        self.index.iter()
    }

    /// Number of distinct indexed tokens
    pub fn token_count(&self) -> usize {
        self.index.len()
    }

    /// Sum of all posting list lengths
    pub fn posting_count(&self) -> usize {
        self.index.values().map(|p| p.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    /// Store length, tombstones included
    pub total_items: usize,
    pub live_items: usize,
    pub total_tokens: usize,
    pub avg_items_per_token: f64,
}
