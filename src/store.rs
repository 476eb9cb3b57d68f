use crate::index::{IndexStats, InvertedIndex};
use crate::item::Item;
use std::collections::HashSet;

/// Items, their cached token sets, and the inverted index over them.
///
/// Positions are append-only. A removed item stays in place as a tombstone
/// with an empty token set, so every posting keeps pointing at the same slot.
/// All writes go through the methods below, which keep
/// `t ∈ tokens[p] ⇔ p ∈ index[t]` for every position and token.
#[derive(Debug, Clone)]
pub struct ItemStore<M = serde_json::Value> {
    items: Vec<Item<M>>,
    tokens: Vec<HashSet<String>>,
    index: InvertedIndex,
}

impl<M> ItemStore<M> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            tokens: Vec::new(),
            index: InvertedIndex::new(),
        }
    }

    /// Append an item at a new position and index its tokens
    pub(crate) fn push(&mut self, item: Item<M>, tokens: HashSet<String>) -> usize {
        let position = self.items.len();
        self.index.insert(position, &tokens);
        self.items.push(item);
        self.tokens.push(tokens);
        position
    }

    /// First position holding `id`. Duplicate ids resolve to the earliest.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Replace the text and token set at `position`; id and meta are kept
    pub(crate) fn replace_text(&mut self, position: usize, text: String, tokens: HashSet<String>) {
        self.index.remove(position, &self.tokens[position]);
        self.index.insert(position, &tokens);
        self.tokens[position] = tokens;
        self.items[position].text = text;
    }

    /// Overwrite `position` with a tombstone and clear its postings
    pub(crate) fn tombstone(&mut self, position: usize) {
        let tokens = std::mem::take(&mut self.tokens[position]);
        self.index.remove(position, &tokens);
        let id = std::mem::take(&mut self.items[position].id);
        self.items[position] = Item::tombstone(id);
    }

    pub fn item(&self, position: usize) -> Option<&Item<M>> {
        self.items.get(position)
    }

    pub fn tokens(&self, position: usize) -> Option<&HashSet<String>> {
        self.tokens.get(position)
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn items(&self) -> &[Item<M>] {
        &self.items
    }

    /// Store length, tombstones included
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions whose item is not a tombstone
    pub fn live_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_tombstone()).count()
    }

    /// Check the store/index invariant in both directions
    pub fn is_consistent(&self) -> bool {
        let forward = self.tokens.iter().enumerate().all(|(position, tokens)| {
            tokens
                .iter()
                .all(|token| self.index.contains(token, position))
        });

        let backward = self.index.iter().all(|(token, postings)| {
            !postings.is_empty()
                && postings.iter().all(|&position| {
                    self.tokens
                        .get(position)
                        .map_or(false, |tokens| tokens.contains(token.as_str()))
                })
        });

        forward && backward && self.items.len() == self.tokens.len()
    }

    pub fn stats(&self) -> IndexStats {
        let total_tokens = self.index.token_count();
        IndexStats {
            total_items: self.items.len(),
            live_items: self.live_count(),
            total_tokens,
            avg_items_per_token: if total_tokens == 0 {
                0.0
            } else {
                self.index.posting_count() as f64 / total_tokens as f64
            },
        }
    }
}

impl<M> Default for ItemStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> HashSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_push_assigns_positions() {
        let mut store: ItemStore = ItemStore::new();
        assert_eq!(store.push(Item::new("a", "apple pie"), set(&["apple", "pie"])), 0);
        assert_eq!(store.push(Item::new("b", "apple juice"), set(&["apple", "juice"])), 1);

        assert_eq!(store.len(), 2);
        assert_eq!(store.index().doc_frequency("apple"), 2);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_position_of_first_match_wins() {
        let mut store: ItemStore = ItemStore::new();
        store.push(Item::new("dup", "one"), set(&["one"]));
        store.push(Item::new("dup", "two"), set(&["two"]));
        assert_eq!(store.position_of("dup"), Some(0));
        assert_eq!(store.position_of("missing"), None);
    }

    #[test]
    fn test_tombstone_clears_postings() {
        let mut store: ItemStore = ItemStore::new();
        store.push(Item::new("a", "apple pie").with_meta(serde_json::json!(1)), set(&["apple", "pie"]));
        store.push(Item::new("b", "apple"), set(&["apple"]));

        store.tombstone(0);

        let dead = store.item(0).unwrap();
        assert_eq!(dead.id, "a");
        assert!(dead.text.is_empty());
        assert!(dead.meta.is_none());
        assert!(store.tokens(0).unwrap().is_empty());
        assert!(store.index().postings("pie").is_none());
        assert_eq!(store.index().doc_frequency("apple"), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.live_count(), 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_replace_text_moves_postings() {
        let mut store: ItemStore = ItemStore::new();
        store.push(Item::new("u1", "old words").with_meta(serde_json::json!("m")), set(&["old", "words"]));

        store.replace_text(0, "new words".to_string(), set(&["new", "words"]));

        let item = store.item(0).unwrap();
        assert_eq!(item.text, "new words");
        assert_eq!(item.meta, Some(serde_json::json!("m")));
        assert!(store.index().postings("old").is_none());
        assert!(store.index().contains("new", 0));
        assert!(store.index().contains("words", 0));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_stats() {
        let mut store: ItemStore = ItemStore::new();
        store.push(Item::new("a", "apple pie"), set(&["apple", "pie"]));
        store.push(Item::new("b", "apple"), set(&["apple"]));
        store.tombstone(1);

        let stats = store.stats();
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.live_items, 1);
        assert_eq!(stats.total_tokens, 2);
        assert!((stats.avg_items_per_token - 1.0).abs() < f64::EPSILON);
    }
}
