use std::fmt;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use nt_core::{CandidateArticle, Entity, NewsSearch, SearchHit};
use nt_inference::SimilarityScorer;
use tracing::{debug, warn};

use crate::SimilarityAnchor;

/// Candidates scoring at or below this are dropped.
pub const MIN_CANDIDATE_SIMILARITY: f32 = 0.30;

/// Upper bound on returned candidates.
pub const MAX_CANDIDATES: usize = 5;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Join entity texts into a single disjunctive query.
pub fn build_query(entities: &[Entity]) -> String {
    entities
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Retrieves and ranks articles related to a set of entities.
pub struct ArticleSearch {
    backend: Arc<dyn NewsSearch>,
    scorer: SimilarityScorer,
    anchor: SimilarityAnchor,
    concurrency: usize,
}

impl fmt::Debug for ArticleSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleSearch")
            .field("backend", &self.backend.name())
            .field("scorer", &self.scorer)
            .field("anchor", &self.anchor)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl ArticleSearch {
    pub fn new(backend: Arc<dyn NewsSearch>, scorer: SimilarityScorer) -> Self {
        Self {
            backend,
            scorer,
            anchor: SimilarityAnchor::default(),
            concurrency: 1,
        }
    }

    pub fn with_anchor(mut self, anchor: SimilarityAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Number of similarity calls allowed in flight at once. `1` scores
    /// candidates strictly one after another.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Find up to [`MAX_CANDIDATES`] articles related to `entities`, best first.
    ///
    /// Best effort: a failing search yields an empty list. Hits without a
    /// description are skipped, and candidates scoring at or below
    /// [`MIN_CANDIDATE_SIMILARITY`] are dropped.
    pub async fn find_related(&self, article: &str, entities: &[Entity]) -> Vec<CandidateArticle> {
        let query = build_query(entities);
        debug!("Searching {} for {:?}", self.backend.name(), query);

        let hits = match self.backend.search(&query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Article search with {} failed: {}", self.backend.name(), e);
                return Vec::new();
            }
        };
        let total = hits.len();

        let described: Vec<(SearchHit, String)> = hits
            .into_iter()
            .filter_map(|mut hit| {
                let description = hit.description.take().filter(|d| !d.is_empty())?;
                Some((hit, description))
            })
            .collect();

        // `buffered` yields in input order, so scores line up with `described`.
        let jobs: Vec<_> = described
            .iter()
            .map(|(_, description)| {
                let anchor = match self.anchor {
                    SimilarityAnchor::Article => article,
                    SimilarityAnchor::Candidate => description.as_str(),
                };
                self.scorer.score(anchor, description)
            })
            .collect();
        let scores: Vec<f32> = stream::iter(jobs)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut candidates: Vec<CandidateArticle> = described
            .into_iter()
            .zip(scores)
            .filter(|(_, score)| *score > MIN_CANDIDATE_SIMILARITY)
            .map(|((hit, description), score)| CandidateArticle {
                title: hit.title.unwrap_or_else(|| UNTITLED.to_string()),
                url: hit.url.unwrap_or_default(),
                source: hit.source.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                description,
                published_at: hit.published_at,
                similarity_score: score,
            })
            .collect();

        candidates.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        candidates.truncate(MAX_CANDIDATES);

        debug!(
            "Kept {}/{} search results for {:?}",
            candidates.len(),
            total,
            query
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nt_core::{Error, Result, SentenceSimilarity};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Returns fixed hits and records every query it receives.
    struct FixedSearch {
        hits: Vec<SearchHit>,
        queries: Mutex<Vec<String>>,
    }

    impl FixedSearch {
        fn new(hits: Vec<SearchHit>) -> Self {
            Self {
                hits,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NewsSearch for FixedSearch {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.hits.clone())
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl NewsSearch for FailingSearch {
        fn name(&self) -> &str {
            "failing"
        }

        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
            Err(Error::decode("search", "missing field `articles`"))
        }
    }

    /// Scores by looking up the compared sentence; identical texts score 1.
    struct TableSimilarity(HashMap<String, f32>);

    #[async_trait]
    impl SentenceSimilarity for TableSimilarity {
        fn name(&self) -> &str {
            "table"
        }

        async fn similarity(&self, source: &str, sentences: &[String]) -> Result<Vec<f32>> {
            Ok(sentences
                .iter()
                .map(|s| {
                    if s == source {
                        1.0
                    } else {
                        self.0.get(s).copied().unwrap_or(0.0)
                    }
                })
                .collect())
        }
    }

    fn hit(title: &str, description: Option<&str>) -> SearchHit {
        SearchHit {
            title: Some(title.to_string()),
            url: Some(format!("https://news.example/{title}")),
            source: Some("Example".to_string()),
            description: description.map(str::to_string),
            published_at: None,
        }
    }

    fn entity(text: &str) -> Entity {
        Entity {
            text: text.to_string(),
            kind: "ORG".to_string(),
            confidence: 0.9,
        }
    }

    fn scorer(table: &[(&str, f32)]) -> SimilarityScorer {
        let table = table.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        SimilarityScorer::new(Arc::new(TableSimilarity(table)))
    }

    #[test]
    fn test_build_query() {
        assert_eq!(build_query(&[entity("NASA"), entity("SpaceX")]), "NASA OR SpaceX");
        assert_eq!(build_query(&[entity("NASA")]), "NASA");
        assert_eq!(build_query(&[]), "");
    }

    #[tokio::test]
    async fn test_filters_sorts_and_truncates() {
        let hits = vec![
            hit("a", Some("d-a")),
            hit("b", Some("d-b")),
            hit("c", Some("d-c")),
            hit("d", Some("d-d")),
            hit("e", Some("d-e")),
            hit("f", Some("d-f")),
            hit("g", Some("d-g")),
            hit("h", Some("d-h")),
        ];
        let scorer = scorer(&[
            ("d-a", 0.31),
            ("d-b", 0.30),
            ("d-c", 0.95),
            ("d-d", 0.50),
            ("d-e", 0.70),
            ("d-f", 0.10),
            ("d-g", 0.60),
            ("d-h", 0.85),
        ]);
        let search = ArticleSearch::new(Arc::new(FixedSearch::new(hits)), scorer);

        let candidates = search.find_related("article", &[entity("X")]).await;
        let titles: Vec<_> = candidates.iter().map(|c| c.title.as_str()).collect();

        assert_eq!(titles, vec!["c", "h", "e", "g", "d"]);
        assert!(candidates.len() <= MAX_CANDIDATES);
        assert!(candidates
            .iter()
            .all(|c| c.similarity_score > MIN_CANDIDATE_SIMILARITY));
        assert!(candidates
            .windows(2)
            .all(|w| w[0].similarity_score >= w[1].similarity_score));
    }

    #[tokio::test]
    async fn test_skips_hits_without_description() {
        let hits = vec![hit("a", None), hit("b", Some("")), hit("c", Some("d-c"))];
        let search = ArticleSearch::new(
            Arc::new(FixedSearch::new(hits)),
            scorer(&[("d-c", 0.9)]),
        );

        let candidates = search.find_related("article", &[entity("X")]).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].description, "d-c");
    }

    #[tokio::test]
    async fn test_placeholders_for_missing_metadata() {
        let hits = vec![SearchHit {
            description: Some("d".to_string()),
            ..SearchHit::default()
        }];
        let search = ArticleSearch::new(Arc::new(FixedSearch::new(hits)), scorer(&[("d", 0.9)]));

        let candidates = search.find_related("article", &[]).await;
        assert_eq!(candidates[0].title, UNTITLED);
        assert_eq!(candidates[0].source, UNKNOWN_SOURCE);
        assert_eq!(candidates[0].url, "");
    }

    #[tokio::test]
    async fn test_empty_entities_still_search() {
        let backend = Arc::new(FixedSearch::new(vec![]));
        let search = ArticleSearch::new(backend.clone(), scorer(&[]));

        let candidates = search.find_related("article", &[]).await;
        assert!(candidates.is_empty());
        assert_eq!(*backend.queries.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_empty() {
        let search = ArticleSearch::new(Arc::new(FailingSearch), scorer(&[]));
        assert!(search.find_related("article", &[entity("X")]).await.is_empty());
    }

    #[tokio::test]
    async fn test_article_anchor_compares_against_article() {
        // The table scores "d-low" low against the article.
        let hits = vec![hit("low", Some("d-low"))];
        let search = ArticleSearch::new(
            Arc::new(FixedSearch::new(hits)),
            scorer(&[("d-low", 0.2)]),
        )
        .with_anchor(SimilarityAnchor::Article);

        assert!(search.find_related("article", &[entity("X")]).await.is_empty());
    }

    #[tokio::test]
    async fn test_candidate_anchor_compares_description_with_itself() {
        // Self-comparison always scores 1, whatever the article says.
        let hits = vec![hit("low", Some("d-low"))];
        let search = ArticleSearch::new(
            Arc::new(FixedSearch::new(hits)),
            scorer(&[("d-low", 0.2)]),
        )
        .with_anchor(SimilarityAnchor::Candidate);

        let candidates = search.find_related("article", &[entity("X")]).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].similarity_score, 1.0);
    }

    #[tokio::test]
    async fn test_concurrency_does_not_change_ranking() {
        let hits: Vec<_> = (0..8)
            .map(|i| hit(&format!("t{i}"), Some(&format!("d{i}"))))
            .collect();
        let table: Vec<(String, f32)> = (0..8).map(|i| (format!("d{i}"), 0.9)).collect();
        let table: Vec<(&str, f32)> = table.iter().map(|(k, v)| (k.as_str(), *v)).collect();

        let sequential = ArticleSearch::new(Arc::new(FixedSearch::new(hits.clone())), scorer(&table))
            .with_concurrency(1)
            .find_related("article", &[entity("X")])
            .await;
        let parallel = ArticleSearch::new(Arc::new(FixedSearch::new(hits)), scorer(&table))
            .with_concurrency(8)
            .find_related("article", &[entity("X")])
            .await;

        assert_eq!(sequential, parallel);
        // Equal scores keep search order.
        let titles: Vec<_> = sequential.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    fn assert_send<T: Send>(_: T) {}

    #[test]
    fn test_find_related_future_is_send() {
        let search = ArticleSearch::new(Arc::new(FixedSearch::new(vec![])), scorer(&[]));
        let entities = [entity("X")];
        assert_send(search.find_related("article", &entities));
    }

    #[tokio::test]
    async fn test_find_related_runs_on_spawned_task() {
        let hits = vec![hit("a", Some("d-a"))];
        let search = Arc::new(ArticleSearch::new(
            Arc::new(FixedSearch::new(hits)),
            scorer(&[("d-a", 0.9)]),
        ));

        let task = {
            let search = search.clone();
            tokio::spawn(async move {
                let article = String::from("article");
                let entities = vec![entity("X")];
                search.find_related(&article, &entities).await
            })
        };

        let candidates = task.await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "a");
    }
}
