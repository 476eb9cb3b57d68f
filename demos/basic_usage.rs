use jaccsuggest::{Item, StopWords, SuggestOptions, Suggester, SuggesterOptions};

fn main() -> anyhow::Result<()> {
    println!("=== jaccsuggest Basic Usage Example ===\n");

    // Build a suggester from bare strings; ids are assigned from positions
    let mut suggester: Suggester =
        Suggester::with_data(["apple pie", "banana smoothie", "chocolate cake", "apple juice"]);

    // Items with a caller-chosen id and metadata
    suggester.add(Item::new("tart", "pineapple tart").with_meta(serde_json::json!({"price": 4.5})));
    suggester.add(Item::new("crumble", "apple crumble with cream"));

    println!("✓ Indexed {} items\n", suggester.size());

    // Example 1: Default suggestions
    println!("--- Example 1: Suggest 'apple' ---");
    for (i, s) in suggester.suggest_default("apple").iter().enumerate() {
        println!("  {}. [{:.4}] {} ({})", i + 1, s.score, s.item.text, s.item.id);
    }

    // Example 2: Per-call overrides
    println!("\n--- Example 2: Suggest 'apple' with min_score 0.5, top 1 ---");
    let options = SuggestOptions::default().with_min_score(0.5).with_top_k(1);
    for s in suggester.suggest("apple", &options) {
        println!("  [{:.4}] {}", s.score, s.item.text);
    }

    // Example 3: Remove an item
    println!("\n--- Example 3: Remove item '0' (apple pie) ---");
    let removed = suggester.remove("0");
    println!("  removed: {removed}, size still {}", suggester.size());
    let results = suggester.suggest_default("apple pie");
    println!("  'apple pie' now matches {} items", results.len());

    // Example 4: Update an item, including a removed one
    println!("\n--- Example 4: Update items ---");
    suggester.update("crumble", "rhubarb crumble");
    suggester.update("0", "cherry pie");
    for query in ["apple", "crumble", "pie"] {
        let texts: Vec<&str> = suggester
            .suggest_default(query)
            .iter()
            .map(|s| s.item.text.as_str())
            .collect();
        println!("  {query}: {texts:?}");
    }

    // Example 5: Custom configuration
    println!("\n--- Example 5: Keep stopwords, require a 0.3 score ---");
    let options = SuggesterOptions::default()
        .with_stop_words(StopWords::none())
        .with_min_score(0.3);
    options.validate()?;
    let titles: Suggester = Suggester::new(["the end", "end of the road", "the beginning"], options);
    for s in titles.suggest_default("the end") {
        println!("  [{:.4}] {}", s.score, s.item.text);
    }

    // Example 6: Statistics
    println!("\n--- Example 6: Index Statistics ---");
    let stats = suggester.stats();
    println!("Total items: {}", stats.total_items);
    println!("Live items: {}", stats.live_items);
    println!("Distinct tokens: {}", stats.total_tokens);
    println!("Average items per token: {:.2}", stats.avg_items_per_token);

    println!("\n=== Example Complete ===");

    Ok(())
}
