use crate::excerpt::excerpt;
use crate::index::{norm, term_frequencies, weigh, Index, SparseVector};
use crate::SearchResult;

struct QueryVector {
    weights: SparseVector,
    norm: f64,
}

impl QueryVector {
    /// Weigh query terms by the index's idf; unseen terms are dropped.
    fn new(tokens: &[String], index: &Index) -> Self {
        let weights = weigh(&term_frequencies(tokens), index.idf());
        let norm = norm(&weights);
        Self { weights, norm }
    }

    fn dot(&self, doc: &SparseVector) -> f64 {
        self.weights
            .iter()
            .map(|(term, w)| w * doc.get(term).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Rank every document by cosine similarity to `query` and return the top `top_k`.
///
/// Ties keep load order. An empty or unmatched query still returns
/// `min(top_k, len)` results, all scored `0.0`.
pub fn search(index: &Index, query: &str, top_k: usize) -> Vec<SearchResult> {
    let query_terms = index.tokenizer().tokenize(query);
    let qv = QueryVector::new(&query_terms, index);

    let mut scored: Vec<(f64, usize)> = index
        .doc_vectors()
        .iter()
        .zip(index.doc_norms())
        .enumerate()
        .map(|(i, (vector, doc_norm))| (qv.dot(vector) / (doc_norm * qv.norm), i))
        .collect();
    // stable: equal scores keep document order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    tracing::debug!(
        query,
        terms = qv.weights.len(),
        matched = scored.iter().filter(|(s, _)| *s > 0.0).count(),
        "search"
    );

    scored
        .into_iter()
        .take(top_k)
        .map(|(score, i)| {
            let doc = &index.documents()[i];
            SearchResult {
                source: doc.source.clone(),
                doc_id: doc.id.clone(),
                score: round6(score),
                excerpt: excerpt(&doc.content, &query_terms),
            }
        })
        .collect()
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}
