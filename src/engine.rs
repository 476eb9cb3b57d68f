use crate::error::{check_min_score, Result};
use crate::index::IndexStats;
use crate::item::{Item, ItemInput};
use crate::ranking::{jaccard, rank, Suggestion};
use crate::store::ItemStore;
use crate::tokenizer::{default_segmenter, Segmenter, StopWords, Tokenizer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Instance-level configuration
#[derive(Clone)]
pub struct SuggesterOptions {
    pub tokenizer: Segmenter,
    pub stop_words: StopWords,
    /// Minimum Jaccard score kept in results
    pub min_score: f64,
    /// Maximum number of results
    pub top_k: usize,
}

impl Default for SuggesterOptions {
    fn default() -> Self {
        Self {
            tokenizer: Arc::new(default_segmenter),
            stop_words: StopWords::default(),
            min_score: 0.0,
            top_k: 5,
        }
    }
}

impl SuggesterOptions {
    pub fn with_tokenizer<F>(mut self, tokenizer: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        self.tokenizer = Arc::new(tokenizer);
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Opt-in range check. The suggester itself accepts any value.
    pub fn validate(&self) -> Result<()> {
        check_min_score(self.min_score)
    }
}

impl fmt::Debug for SuggesterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggesterOptions")
            .field("stop_words", &self.stop_words.len())
            .field("min_score", &self.min_score)
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

/// Per-call overrides for `suggest`; `None` falls back to the instance value
#[derive(Clone, Default)]
pub struct SuggestOptions {
    pub tokenizer: Option<Segmenter>,
    pub stop_words: Option<StopWords>,
    pub min_score: Option<f64>,
    pub top_k: Option<usize>,
}

impl SuggestOptions {
    pub fn with_tokenizer<F>(mut self, tokenizer: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.min_score {
            Some(min_score) => check_min_score(min_score),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for SuggestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestOptions")
            .field("tokenizer", &self.tokenizer.as_ref().map(|_| "custom"))
            .field("stop_words", &self.stop_words.as_ref().map(StopWords::len))
            .field("min_score", &self.min_score)
            .field("top_k", &self.top_k)
            .finish()
    }
}

/// Jaccard suggester over a mutable collection of short texts.
///
/// Mutations take `&mut self` and queries `&self`; share across threads
/// behind your own lock.
#[derive(Debug, Clone)]
pub struct Suggester<M = serde_json::Value> {
    store: ItemStore<M>,
    tokenizer: Tokenizer,
    min_score: f64,
    top_k: usize,
}

impl<M> Suggester<M> {
    /// Create a suggester and add `initial` in order
    pub fn new<I, T>(initial: I, options: SuggesterOptions) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemInput<M>>,
    {
        let mut suggester = Self {
            store: ItemStore::new(),
            tokenizer: Tokenizer::with_parts(options.tokenizer, options.stop_words),
            min_score: options.min_score,
            top_k: options.top_k,
        };
        suggester.extend(initial);
        suggester
    }

    /// Create a suggester with default options
    pub fn with_data<I, T>(initial: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemInput<M>>,
    {
        Self::new(initial, SuggesterOptions::default())
    }

    /// Add an item at a new position.
    ///
    /// Bare text gets the current store length as its id.
    pub fn add(&mut self, input: impl Into<ItemInput<M>>) -> &Item<M> {
        let position = self.store.len();
        let item = input.into().into_item(position);
        let tokens = self.tokenizer.analyze_unique(&item.text);
        debug!(position, id = %item.id, tokens = tokens.len(), "added item");

        let position = self.store.push(item, tokens);
        &self.store.items()[position]
    }

    /// Batch add, in iteration order
    pub fn extend<I, T>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemInput<M>>,
    {
        for input in inputs {
            self.add(input);
        }
    }

    /// Tombstone the first item with `id`.
    ///
    /// Returns false if no item has that id. Removing a tombstone again
    /// returns true and changes nothing.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(position) = self.store.position_of(id) else {
            debug!(id, "remove: id not found");
            return false;
        };

        self.store.tombstone(position);
        debug!(position, id, "removed item");
        true
    }

    /// Replace the text of the first item with `id` and re-index it.
    ///
    /// Id and meta are left untouched. Updating a tombstone brings it back
    /// at its original position.
    pub fn update(&mut self, id: &str, text: impl Into<String>) -> bool {
        let Some(position) = self.store.position_of(id) else {
            debug!(id, "update: id not found");
            return false;
        };

        let text = text.into();
        let tokens = self.tokenizer.analyze_unique(&text);
        debug!(position, id, tokens = tokens.len(), "updated item");
        self.store.replace_text(position, text, tokens);
        true
    }

    /// Store length, tombstones included. Never decreases.
    pub fn size(&self) -> usize {
        self.store.len()
    }

    pub fn live_count(&self) -> usize {
        self.store.live_count()
    }

    /// First item with `id`, tombstones included
    pub fn get(&self, id: &str) -> Option<&Item<M>> {
        self.store
            .position_of(id)
            .and_then(|position| self.store.item(position))
    }

    pub fn items(&self) -> &[Item<M>] {
        self.store.items()
    }

    pub fn store(&self) -> &ItemStore<M> {
        &self.store
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn stats(&self) -> IndexStats {
        self.store.stats()
    }

    pub fn is_consistent(&self) -> bool {
        self.store.is_consistent()
    }

    /// Items most similar to `query`, best first.
    ///
    /// Only items sharing at least one token with the query are scored. Equal
    /// scores are ordered by ascending position.
    pub fn suggest(&self, query: &str, options: &SuggestOptions) -> Vec<Suggestion<'_, M>> {
        let min_score = options.min_score.unwrap_or(self.min_score);
        let top_k = options.top_k.unwrap_or(self.top_k);

        let query_tokens = self.query_tokens(query, options);
        if query_tokens.is_empty() {
            trace!("suggest: query has no indexable tokens");
            return Vec::new();
        }

        let candidates = self.store.index().candidates(&query_tokens);
        if candidates.is_empty() {
            trace!(tokens = query_tokens.len(), "suggest: no candidates");
            return Vec::new();
        }

        let mut scored = Vec::with_capacity(candidates.len());
        for &position in &candidates {
            let (Some(item), Some(tokens)) = (self.store.item(position), self.store.tokens(position))
            else {
                continue;
            };
            if tokens.is_empty() {
                continue;
            }

            let score = jaccard(&query_tokens, tokens);
            if score >= min_score {
                scored.push(Suggestion {
                    item,
                    position,
                    score,
                });
            }
        }

        trace!(
            candidates = candidates.len(),
            kept = scored.len(),
            top_k,
            "suggest: scored candidates"
        );
        rank(scored, top_k)
    }

    /// `suggest` with the instance defaults
    pub fn suggest_default(&self, query: &str) -> Vec<Suggestion<'_, M>> {
        self.suggest(query, &SuggestOptions::default())
    }

    fn query_tokens(&self, query: &str, options: &SuggestOptions) -> HashSet<String> {
        if options.tokenizer.is_none() && options.stop_words.is_none() {
            return self.tokenizer.analyze_unique(query);
        }

        let segmenter = options
            .tokenizer
            .clone()
            .unwrap_or_else(|| Arc::clone(self.tokenizer.segmenter()));
        let stop_words = options
            .stop_words
            .clone()
            .unwrap_or_else(|| self.tokenizer.stop_words().clone());
        Tokenizer::with_parts(segmenter, stop_words).analyze_unique(query)
    }
}

impl<M> Default for Suggester<M> {
    fn default() -> Self {
        Self::new(std::iter::empty::<ItemInput<M>>(), SuggesterOptions::default())
    }
}
