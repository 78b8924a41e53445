use crate::tokenizer::TokenizerOptions;

pub const DEFAULT_FEATURES: [&str; 4] = ["genres", "keywords", "cast", "director"];
pub const DEFAULT_TOP_K: usize = 10;
/// Minimum fuzzy ratio a title needs to count as a match.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Construction-time settings for a [`crate::Recommender`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// Feature columns joined, in this order, into each item's document.
    pub features: Vec<String>,
    pub top_k: usize,
    pub cutoff: f64,
    pub tokenizer: TokenizerOptions,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            features: DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect(),
            top_k: DEFAULT_TOP_K,
            cutoff: DEFAULT_CUTOFF,
            tokenizer: TokenizerOptions::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerOptions) -> Self {
        self.tokenizer = tokenizer;
        self
    }
}
