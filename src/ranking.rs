use crate::item::Item;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Jaccard similarity `|A ∩ B| / |A ∪ B|` of two token sets.
///
/// Two empty sets score 1.0.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    // probe the larger set with the smaller one
    let (small, large) = if a.len() < b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|t| large.contains(t.as_str())).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Ranked suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<'a, M = serde_json::Value> {
    pub item: &'a Item<M>,
    pub position: usize,
    pub score: f64,
}

/// Sort by score descending, ties by ascending position, then keep `top_k`.
pub fn rank<M>(mut scored: Vec<Suggestion<'_, M>>, top_k: usize) -> Vec<Suggestion<'_, M>> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.position.cmp(&b.position))
    });
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> HashSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_jaccard_identity() {
        let a = set(&["apple", "pie"]);
        assert_eq!(jaccard(&a, &a), 1.0);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 1.0);
    }

    #[test]
    fn test_jaccard_one_side_empty() {
        assert_eq!(jaccard(&set(&["apple"]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&[]), &set(&["apple"])), 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let a = set(&["apple"]);
        let b = set(&["apple", "pie"]);
        assert_eq!(jaccard(&a, &b), 0.5);

        let c = set(&["a", "b", "c"]);
        let d = set(&["b", "c", "d", "e"]);
        assert!((jaccard(&c, &d) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_symmetric_and_bounded() {
        let samples = [
            set(&[]),
            set(&["x"]),
            set(&["x", "y"]),
            set(&["y", "z", "w"]),
            set(&["q"]),
        ];
        for a in &samples {
            for b in &samples {
                let ab = jaccard(a, b);
                assert_eq!(ab, jaccard(b, a));
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_rank_orders_and_truncates() {
        let items: Vec<Item> = (0..4).map(|i| Item::new(i.to_string(), "x")).collect();
        let scored = vec![
            Suggestion { item: &items[2], position: 2, score: 0.5 },
            Suggestion { item: &items[0], position: 0, score: 0.25 },
            Suggestion { item: &items[3], position: 3, score: 1.0 },
            Suggestion { item: &items[1], position: 1, score: 0.5 },
        ];

        let ranked = rank(scored.clone(), 3);
        let positions: Vec<usize> = ranked.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![3, 1, 2]);

        assert!(rank(scored, 0).is_empty());
    }
}
