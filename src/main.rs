use anyhow::{Context, Result};
use clap::Parser;
use jaccsuggest::{Item, StopWords, SuggestOptions, Suggester, SuggesterOptions, Suggestion};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Jaccard similarity suggestions over a text corpus", long_about = None)]
struct Args {
    /// Corpus file, one item per line ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    corpus: String,

    /// Corpus lines are JSON items ({"id", "text", "meta"})
    #[arg(long)]
    jsonl: bool,

    /// Query to run; repeat for several
    #[arg(short, long, required = true)]
    query: Vec<String>,

    #[arg(long, default_value_t = 0.0)]
    min_score: f64,

    #[arg(short = 'k', long, default_value_t = 5)]
    top_k: usize,

    /// Keep stopwords in items and queries
    #[arg(long)]
    no_stopwords: bool,

    /// Remove these ids before querying
    #[arg(long)]
    remove: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct QueryResult<'a> {
    query: &'a str,
    results: Vec<Suggestion<'a>>,
}

fn read_corpus(args: &Args) -> Result<Vec<Item>> {
    let reader: Box<dyn BufRead> = if args.corpus == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.corpus)
            .with_context(|| format!("Failed to open corpus {}", args.corpus))?;
        Box::new(BufReader::new(file))
    };

    let mut items = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read corpus")?;
        let item = if args.jsonl {
            if line.trim().is_empty() {
                continue;
            }
            serde_json::from_str(&line)
                .with_context(|| format!("Invalid JSON item on line {}", line_no + 1))?
        } else {
            Item::new(items.len().to_string(), line)
        };
        items.push(item);
    }
    Ok(items)
}

fn print_text(query: &str, results: &[Suggestion<'_>]) {
    println!("{query}");
    if results.is_empty() {
        println!("  (no matches)");
    }
    for (rank, suggestion) in results.iter().enumerate() {
        println!(
            "  {}. [{:.4}] {}\t{}",
            rank + 1,
            suggestion.score,
            suggestion.item.id,
            suggestion.item.text
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut options = SuggesterOptions::default()
        .with_min_score(args.min_score)
        .with_top_k(args.top_k);
    if args.no_stopwords {
        options = options.with_stop_words(StopWords::none());
    }
    options.validate()?;

    let start = Instant::now();
    let items = read_corpus(&args)?;
    let mut suggester: Suggester = Suggester::new(items, options);
    info!(items = suggester.size(), elapsed = ?start.elapsed(), "indexed corpus");

    for id in &args.remove {
        if !suggester.remove(id) {
            info!(id = %id, "no item to remove");
        }
    }

    let stats = suggester.stats();
    info!(
        live = stats.live_items,
        tokens = stats.total_tokens,
        avg_items_per_token = stats.avg_items_per_token,
        "index ready"
    );

    let defaults = SuggestOptions::default();
    let mut output = Vec::with_capacity(args.query.len());
    for query in &args.query {
        let results = suggester.suggest(query, &defaults);
        if args.json {
            output.push(QueryResult { query, results });
        } else {
            print_text(query, &results);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
