use crate::ItemId;
use std::path::PathBuf;
use thiserror::Error;

/// Reading the source table or turning it into a catalog failed.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("cannot read {path:?}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("source has no `title` column")]
    MissingTitleColumn,

    #[error("row {row}: invalid identifier {value:?}")]
    InvalidIdentifier { row: usize, value: String },
}

/// Every document tokenized to nothing, so there is nothing to weight.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("empty vocabulary; every document is empty after tokenization")]
pub struct EmptyVocabularyError;

#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    #[error("no matches found for {query:?}")]
    NoMatch { query: String },

    #[error("requested {requested} results but the catalog only has {available} items")]
    InsufficientResults { requested: usize, available: usize },

    #[error("no item with identifier {id}")]
    UnknownIdentifier { id: ItemId },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),

    #[error(transparent)]
    EmptyVocabulary(#[from] EmptyVocabularyError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
