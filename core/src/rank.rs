use crate::catalog::Catalog;
use crate::config::RecommenderConfig;
use crate::error::{EmptyVocabularyError, RecommendError, Result};
use crate::fuzzy::{close_matches, DEFAULT_MAX_MATCHES};
use crate::index::{IndexBuilder, SimilarityIndex};
use crate::similarity::SimilarityMatrix;
use crate::ItemId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub id: ItemId,
    pub title: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub query: String,
    pub matched_id: ItemId,
    pub matched_title: String,
    /// Fuzzy ratio between the query and the matched title.
    pub match_score: f64,
    /// Most similar items first. The matched item itself is included (normally first).
    pub results: Vec<RankedItem>,
}

/// Map `query` to the closest catalog title, then rank every item by similarity to it.
///
/// Equal scores keep catalog order. Titles shared by several items resolve to the first.
pub fn resolve_and_rank(
    query: &str,
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    top_k: usize,
    cutoff: f64,
) -> Result<Recommendation, RecommendError> {
    let titles: Vec<&str> = catalog.titles().collect();
    let best = close_matches(query, &titles, DEFAULT_MAX_MATCHES, cutoff)
        .into_iter()
        .next()
        .ok_or_else(|| RecommendError::NoMatch { query: query.to_string() })?;
    let matched_title = titles[best.index];
    let matched = catalog
        .first_with_title(matched_title)
        .ok_or_else(|| RecommendError::NoMatch { query: query.to_string() })?;
    tracing::debug!(query, matched = matched_title, score = best.score, "resolved query");

    let row = matrix
        .row(matched.id as usize)
        .ok_or(RecommendError::UnknownIdentifier { id: matched.id })?;
    if top_k > row.len() {
        return Err(RecommendError::InsufficientResults { requested: top_k, available: row.len() });
    }

    let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let results = scored
        .into_iter()
        .take(top_k)
        .map(|(index, score)| {
            let id = index as ItemId;
            let item = catalog.by_id(id).ok_or(RecommendError::UnknownIdentifier { id })?;
            Ok(RankedItem { id, title: item.title.clone(), score })
        })
        .collect::<Result<Vec<_>, RecommendError>>()?;

    Ok(Recommendation {
        query: query.to_string(),
        matched_id: matched.id,
        matched_title: matched.title.clone(),
        match_score: best.score,
        results,
    })
}

/// A catalog together with the similarity index built over it.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    index: SimilarityIndex,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(catalog: Catalog, config: RecommenderConfig) -> Result<Self, EmptyVocabularyError> {
        let index = IndexBuilder::new().with_tokenizer(config.tokenizer).build(&catalog, &config.features)?;
        Ok(Self { catalog, index, config })
    }

    /// Load a catalog from disk and build the index over it.
    pub fn from_path<P: AsRef<Path>>(path: P, config: RecommenderConfig) -> Result<Self> {
        let catalog = Catalog::from_path(path)?;
        Ok(Self::new(catalog, config)?)
    }

    /// Recommend `config.top_k` items for `query`.
    pub fn recommend(&self, query: &str) -> Result<Recommendation, RecommendError> {
        self.recommend_top(query, self.config.top_k)
    }

    pub fn recommend_top(&self, query: &str, top_k: usize) -> Result<Recommendation, RecommendError> {
        resolve_and_rank(query, &self.catalog, &self.index.matrix, top_k, self.config.cutoff)
    }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    pub fn index(&self) -> &SimilarityIndex { &self.index }

    pub fn config(&self) -> &RecommenderConfig { &self.config }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Table;

    fn catalog(rows: &[(&str, &str)]) -> Catalog {
        let table = Table {
            columns: vec!["title".into(), "genres".into()],
            rows: rows.iter().map(|(t, g)| vec![Some(t.to_string()), Some(g.to_string())]).collect(),
        };
        Catalog::load(table).unwrap()
    }

    fn recommender(rows: &[(&str, &str)]) -> Recommender {
        Recommender::new(catalog(rows), RecommenderConfig::default().with_features(["genres"])).unwrap()
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let r = recommender(&[("Alpha", "drama"), ("Beta", "comedy"), ("Gamma", "comedy"), ("Delta", "comedy")]);
        let rec = r.recommend_top("Beta", 4).unwrap();
        let ids: Vec<ItemId> = rec.results.iter().map(|x| x.id).collect();
        // Beta, Gamma and Delta all score 1.0 against Beta
        assert_eq!(ids, vec![1, 2, 3, 0]);
    }

    #[test]
    fn query_item_is_not_excluded() {
        let r = recommender(&[("Heat", "crime thriller"), ("Ronin", "crime action"), ("Up", "family")]);
        let rec = r.recommend_top("Ronin", 2).unwrap();
        assert_eq!(rec.results[0].title, "Ronin");
        assert!((rec.results[0].score - 1.0).abs() < 1e-9);
        assert_eq!(rec.results[1].title, "Heat");
    }

    #[test]
    fn exact_title_resolves_to_itself() {
        let r = recommender(&[("Alien", "scifi horror"), ("Aliens", "scifi action"), ("Alien 3", "scifi")]);
        for title in ["Alien", "Aliens", "Alien 3"] {
            let rec = r.recommend_top(title, 1).unwrap();
            assert_eq!(rec.matched_title, title);
            assert_eq!(rec.match_score, 1.0);
        }
    }

    #[test]
    fn duplicate_titles_use_first_item() {
        let r = recommender(&[("Solaris", "scifi"), ("Stalker", "drama"), ("Solaris", "drama")]);
        assert_eq!(r.recommend_top("Solaris", 1).unwrap().matched_id, 0);
    }

    #[test]
    fn too_many_results_requested() {
        let r = recommender(&[("A1", "x1"), ("A2", "x2"), ("A3", "x3"), ("A4", "x4"), ("A5", "x5")]);
        assert_eq!(
            r.recommend_top("A1", 10).unwrap_err(),
            RecommendError::InsufficientResults { requested: 10, available: 5 }
        );
        assert_eq!(r.recommend_top("A1", 5).unwrap().results.len(), 5);
        assert!(r.recommend_top("A1", 0).unwrap().results.is_empty());
    }

    #[test]
    fn unmatched_query_fails() {
        let r = recommender(&[("Avatar", "action"), ("Titanic", "drama")]);
        assert_eq!(
            r.recommend("zzzzqqqq").unwrap_err(),
            RecommendError::NoMatch { query: "zzzzqqqq".into() }
        );
    }

    #[test]
    fn sparse_source_ids_are_reported() {
        let table = Table {
            columns: vec!["index".into(), "title".into(), "genres".into()],
            rows: vec![
                vec![Some("0".into()), Some("Avatar".into()), Some("action".into())],
                vec![Some("5".into()), Some("Titanic".into()), Some("drama".into())],
            ],
        };
        let r = Recommender::new(Catalog::load(table).unwrap(), RecommenderConfig::default()).unwrap();
        assert_eq!(r.recommend_top("Titanic", 1).unwrap_err(), RecommendError::UnknownIdentifier { id: 5 });
    }
}
