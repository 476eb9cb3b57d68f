// Re-export main components
pub mod engine;
pub mod error;
pub mod index;
pub mod item;
pub mod ranking;
pub mod store;
pub mod tokenizer;

// Re-export commonly used types
pub use engine::{SuggestOptions, Suggester, SuggesterOptions};
pub use error::{Error, Result};
pub use index::{IndexStats, InvertedIndex};
pub use item::{Item, ItemInput};
pub use ranking::{jaccard, Suggestion};
pub use store::ItemStore;
pub use tokenizer::{default_segmenter, Segmenter, StopWords, Tokenizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
