//! Content-based recommendations: TF-IDF vectors over per-item text fields,
//! a dense cosine similarity matrix, and fuzzy title lookup to pick the row.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod rank;
pub mod similarity;
pub mod source;
pub mod tokenizer;

pub type ItemId = u32;
pub type TermId = u32;

pub use catalog::{Catalog, Item, Table};
pub use config::RecommenderConfig;
pub use error::{CatalogLoadError, EmptyVocabularyError, Error, RecommendError};
pub use index::{build, IndexBuilder, SimilarityIndex, TermVector, Vocabulary};
pub use rank::{resolve_and_rank, RankedItem, Recommendation, Recommender};
pub use similarity::{cosine, SimilarityMatrix};
