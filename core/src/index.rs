use crate::catalog::Catalog;
use crate::error::EmptyVocabularyError;
use crate::similarity::SimilarityMatrix;
use crate::tokenizer::{tokenize_with, TokenizerOptions};
use crate::TermId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Distinct tokens across all documents. Term ids follow sorted token order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub dictionary: HashMap<String, TermId>,
    /// Number of documents containing each term, indexed by term id.
    pub df: Vec<u32>,
}

impl Vocabulary {
    pub fn len(&self) -> usize { self.df.len() }

    pub fn is_empty(&self) -> bool { self.df.is_empty() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    /// Smoothed idf: ln((1 + n) / (1 + df)) + 1, so terms in every document keep a non-zero weight.
    pub fn idf(&self, term_id: TermId, num_docs: usize) -> f64 {
        let df_t = self.df[term_id as usize] as f64;
        ((1.0 + num_docs as f64) / (1.0 + df_t)).ln() + 1.0
    }
}

/// Sparse tf-idf vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermVector {
    pub entries: Vec<(TermId, f64)>,
}

impl TermVector {
    pub fn weight(&self, term_id: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&term_id, |&(t, _)| t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 { self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt() }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Everything derived from one build over the catalog.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    pub vocabulary: Vocabulary,
    /// One L2-normalized vector per catalog position.
    pub vectors: Vec<TermVector>,
    pub matrix: SimilarityMatrix,
}

#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    tokenizer: TokenizerOptions,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerOptions) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// One document per item: its feature values glued together in `features` order.
    ///
    /// No separator is inserted, so the last word of one feature and the first word of the
    /// next run together ("action" + "James" tokenizes as "actionjames").
    pub fn documents<S: AsRef<str>>(&self, catalog: &Catalog, features: &[S]) -> Vec<String> {
        for feature in features {
            if !catalog.has_column(feature.as_ref()) {
                tracing::warn!(feature = feature.as_ref(), "feature column missing from catalog, treating as empty");
            }
        }
        catalog
            .items()
            .iter()
            .map(|item| features.iter().map(|f| item.feature(f.as_ref())).collect::<String>())
            .collect()
    }

    pub fn build<S: AsRef<str>>(&self, catalog: &Catalog, features: &[S]) -> Result<SimilarityIndex, EmptyVocabularyError> {
        let start = Instant::now();
        let documents = self.documents(catalog, features);
        let (vocabulary, vectors) = self.vectorize(&documents)?;
        tracing::info!(num_docs = documents.len(), num_terms = vocabulary.len(), "vectorized documents");

        let matrix = SimilarityMatrix::from_vectors(&vectors);
        tracing::info!(size = matrix.len(), took_s = start.elapsed().as_secs_f64(), "similarity index built");
        Ok(SimilarityIndex { vocabulary, vectors, matrix })
    }

    /// Raw term counts times smoothed idf, L2-normalized per document.
    pub fn vectorize<S: AsRef<str>>(&self, documents: &[S]) -> Result<(Vocabulary, Vec<TermVector>), EmptyVocabularyError> {
        let counts: Vec<HashMap<String, u32>> = documents
            .iter()
            .map(|doc| {
                let mut tf: HashMap<String, u32> = HashMap::new();
                for token in tokenize_with(doc.as_ref(), self.tokenizer) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return Err(EmptyVocabularyError);
        }

        let mut vocabulary = Vocabulary::default();
        for (tid, (term, df_t)) in doc_freq.into_iter().enumerate() {
            vocabulary.dictionary.insert(term.to_string(), tid as TermId);
            vocabulary.df.push(df_t);
        }

        let n = documents.len();
        let idf: Vec<f64> = (0..vocabulary.len()).map(|tid| vocabulary.idf(tid as TermId, n)).collect();
        let vectors = counts
            .iter()
            .map(|tf| {
                let mut entries: Vec<(TermId, f64)> = tf
                    .iter()
                    .map(|(term, &count)| {
                        let tid = vocabulary.dictionary[term.as_str()];
                        (tid, count as f64 * idf[tid as usize])
                    })
                    .collect();
                entries.sort_by_key(|&(tid, _)| tid);
                let mut v = TermVector { entries };
                let norm = v.norm();
                // Empty documents stay zero vectors.
                if norm > 0.0 {
                    for (_, w) in v.entries.iter_mut() { *w /= norm; }
                }
                v
            })
            .collect();
        Ok((vocabulary, vectors))
    }
}

/// Build with default tokenizer options.
pub fn build<S: AsRef<str>>(catalog: &Catalog, features: &[S]) -> Result<SimilarityIndex, EmptyVocabularyError> {
    IndexBuilder::new().build(catalog, features)
}
