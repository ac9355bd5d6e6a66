use crate::tokenizer::Tokenizer;
use crate::Document;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Sparse term → weight map. Ordered so that sums over it are reproducible.
pub type SparseVector = BTreeMap<String, f64>;

/// In-memory TF-IDF index.
///
/// Position `i` of `documents`, `doc_vectors` and `doc_norms` refers to the
/// same document. Built once and never mutated; rebuild to pick up changes.
#[derive(Debug, Clone)]
pub struct Index {
    documents: Vec<Document>,
    idf: HashMap<String, f64>,
    doc_vectors: Vec<SparseVector>,
    doc_norms: Vec<f64>,
    tokenizer: Tokenizer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub vocabulary_size: usize,
    /// Documents that produced no terms at all.
    pub empty_docs: usize,
}

impl Index {
    pub fn build(documents: Vec<Document>) -> Self {
        Self::build_with(documents, Tokenizer::default())
    }

    pub fn build_with(documents: Vec<Document>, tokenizer: Tokenizer) -> Self {
        let mut df: HashMap<String, u32> = HashMap::new();
        let mut doc_tokens: Vec<Vec<String>> = Vec::with_capacity(documents.len());
        for doc in &documents {
            let tokens = tokenizer.tokenize(&doc.content);
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term.to_string()).or_insert(0) += 1;
            }
            doc_tokens.push(tokens);
        }

        let n = documents.len() as f64;
        let idf: HashMap<String, f64> = df
            .into_iter()
            .map(|(term, count)| {
                let w = ((n + 1.0) / (count as f64 + 1.0)).ln() + 1.0;
                (term, w)
            })
            .collect();

        let mut doc_vectors = Vec::with_capacity(doc_tokens.len());
        let mut doc_norms = Vec::with_capacity(doc_tokens.len());
        for tokens in doc_tokens {
            let vector = weigh(&term_frequencies(&tokens), &idf);
            doc_norms.push(norm(&vector));
            doc_vectors.push(vector);
        }

        let index = Self { documents, idf, doc_vectors, doc_norms, tokenizer };
        let stats = index.stats();
        tracing::info!(
            num_docs = stats.num_docs,
            num_terms = stats.vocabulary_size,
            empty_docs = stats.empty_docs,
            "index build complete"
        );
        index
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn idf(&self) -> &HashMap<String, f64> {
        &self.idf
    }

    pub fn doc_vectors(&self) -> &[SparseVector] {
        &self.doc_vectors
    }

    pub fn doc_norms(&self) -> &[f64] {
        &self.doc_norms
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.documents.len(),
            vocabulary_size: self.idf.len(),
            empty_docs: self.doc_vectors.iter().filter(|v| v.is_empty()).count(),
        }
    }
}

/// Raw occurrence counts.
pub(crate) fn term_frequencies(tokens: &[String]) -> BTreeMap<&str, u32> {
    let mut tf: BTreeMap<&str, u32> = BTreeMap::new();
    for t in tokens {
        *tf.entry(t.as_str()).or_insert(0) += 1;
    }
    tf
}

/// `tf * idf` per term; terms without an idf entry are dropped.
pub(crate) fn weigh(tf: &BTreeMap<&str, u32>, idf: &HashMap<String, f64>) -> SparseVector {
    tf.iter()
        .filter_map(|(term, count)| idf.get(*term).map(|w| (term.to_string(), *count as f64 * w)))
        .collect()
}

/// Euclidean norm, floored to 1.0 for an empty or all-zero vector.
pub(crate) fn norm(vector: &SparseVector) -> f64 {
    let sq: f64 = vector.values().map(|w| w * w).sum();
    if sq > 0.0 {
        sq.sqrt()
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, content: &str) -> Document {
        Document { id: id.into(), source: format!("/corpus/{id}"), content: content.into() }
    }

    #[test]
    fn idf_uses_smoothed_formula() {
        let index = Index::build(vec![doc("a", "x y"), doc("b", "x")]);
        let idf = index.idf();
        // N = 2: df(x) = 2, df(y) = 1
        assert!((idf["x"] - 1.0).abs() < 1e-12);
        assert!((idf["y"] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn df_counts_documents_not_occurrences() {
        let index = Index::build(vec![doc("a", "x x x x"), doc("b", "y")]);
        let expected = (3.0f64 / 2.0).ln() + 1.0;
        assert!((index.idf()["x"] - expected).abs() < 1e-12);
        assert!((index.doc_vectors()[0]["x"] - 4.0 * expected).abs() < 1e-12);
        assert!((index.doc_norms()[0] - 4.0 * expected).abs() < 1e-12);
    }

    #[test]
    fn empty_document_gets_unit_norm() {
        let index = Index::build(vec![doc("a", "!!!"), doc("b", "word")]);
        assert!(index.doc_vectors()[0].is_empty());
        assert_eq!(index.doc_norms()[0], 1.0);
        assert_eq!(index.stats(), IndexStats { num_docs: 2, vocabulary_size: 1, empty_docs: 1 });
    }

    #[test]
    fn lists_stay_aligned_and_every_term_has_idf() {
        let index = Index::build(vec![doc("a", "alpha beta"), doc("b", ""), doc("c", "beta gamma gamma")]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.doc_vectors().len(), 3);
        assert_eq!(index.doc_norms().len(), 3);
        for v in index.doc_vectors() {
            for term in v.keys() {
                assert!(index.idf()[term] > 0.0);
            }
        }
        assert_eq!(index.document("c").map(|d| d.content.as_str()), Some("beta gamma gamma"));
        assert!(index.document("missing").is_none());
    }
}
