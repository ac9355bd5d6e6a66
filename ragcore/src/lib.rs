pub mod config;
pub mod error;
pub mod excerpt;
pub mod index;
pub mod loader;
pub mod search;
pub mod tokenizer;

pub use error::{RagError, Result};
pub use index::{Index, IndexStats, SparseVector};
pub use loader::load_documents;
pub use search::search;

use serde::{Deserialize, Serialize};

/// One text file of the corpus, as loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to the corpus root; unique within one index.
    pub id: String,
    /// Full path of the file the content was read from.
    pub source: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub source: String,
    pub doc_id: String,
    /// Cosine similarity rounded to 6 decimals.
    pub score: f64,
    pub excerpt: String,
}
