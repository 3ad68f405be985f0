use crate::boost::{QueryMatcher, Relevance, ScoringPolicy};
use crate::config::{EngineConfig, SearchParams};
use crate::error::{BuildError, SearchError};
use crate::index::{DocId, Document, TermWeightMatrix, Vocabulary};
use crate::query::vectorize;
use crate::rank::rank;
use crate::tokenizer::Analyzer;
use crate::weighting::WeightingModel;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

/// A built, immutable index. Safe to share across threads once constructed.
#[derive(Debug)]
pub struct SearchEngine {
    analyzer: Analyzer,
    vocabulary: Vocabulary,
    model: WeightingModel,
    matrix: TermWeightMatrix,
    documents: Vec<Document>,
    policy: ScoringPolicy,
    default_params: SearchParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Hits,
    /// Nothing in the top-k cleared the similarity floor.
    NoResults,
    /// No query token exists in the vocabulary.
    DegenerateQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub external_id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub metadata: IndexMap<String, String>,
    pub relevance: Relevance,
    /// Composite boosted score, 0-100.
    pub score: f64,
    /// Raw cosine similarity as a percentage, 0-100.
    pub similarity: f64,
    pub title_matches: usize,
    pub metadata_matches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub k: usize,
    pub status: SearchStatus,
    pub precision_at_k: f64,
    pub results: Vec<SearchHit>,
}

impl SearchReport {
    pub fn is_no_results(&self) -> bool { self.status != SearchStatus::Hits }
}

impl SearchEngine {
    pub fn build(documents: Vec<Document>, config: EngineConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let analyzer = Analyzer::new(config.analyzer);
        let token_streams: Vec<Vec<String>> = documents.iter().map(|d| analyzer.tokenize(&d.body)).collect();
        let vocabulary = Vocabulary::build(&token_streams)?;
        let model = WeightingModel::new(&vocabulary, config.weighting);
        let matrix = model.fit(&token_streams, &vocabulary);

        for (doc_id, doc) in documents.iter().enumerate() {
            if doc.title.is_none() || doc.metadata.is_empty() {
                debug!(doc_id, id = %doc.external_id, has_title = doc.title.is_some(), fields = doc.metadata.len(), "document lacks boostable fields");
            }
        }
        info!(num_docs = documents.len(), num_terms = vocabulary.len(), "search engine built");

        Ok(Self { analyzer, vocabulary, model, matrix, documents, policy: config.policy, default_params: config.search })
    }

    /// Build with [`EngineConfig::default`].
    pub fn with_defaults(documents: Vec<Document>) -> Result<Self, BuildError> {
        Self::build(documents, EngineConfig::default())
    }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn document(&self, doc_id: DocId) -> Option<&Document> { self.documents.get(doc_id as usize) }

    pub fn matrix(&self) -> &TermWeightMatrix { &self.matrix }

    pub fn default_params(&self) -> SearchParams { self.default_params }

    /// Raw cosine ranking of every document, without boosting or the floor.
    pub fn rank(&self, query: &str) -> Vec<(DocId, f64)> {
        let tokens = self.analyzer.tokenize(query);
        rank(&vectorize(&tokens, &self.vocabulary, &self.model), &self.matrix)
    }

    pub fn search(&self, query: &str, params: SearchParams) -> Result<SearchReport, SearchError> {
        params.validate()?;
        let tokens = self.analyzer.tokenize(query);
        let query_vector = vectorize(&tokens, &self.vocabulary, &self.model);
        let ranked = rank(&query_vector, &self.matrix);
        let matcher = QueryMatcher::new(query, &self.analyzer);

        let mut results = Vec::new();
        let mut high_count = 0usize;
        // Boosting only re-scores the similarity top-k, it never pulls documents in from below.
        for (doc_id, similarity) in ranked.into_iter().take(params.k) {
            if similarity <= params.similarity_floor { continue; }
            let doc = &self.documents[doc_id as usize];
            let boosted = self.policy.score_with(&matcher, doc, similarity);
            if boosted.relevance == Relevance::High { high_count += 1; }
            results.push(SearchHit {
                doc_id,
                external_id: doc.external_id.clone(),
                url: doc.url.clone(),
                title: doc.title.clone(),
                metadata: doc.metadata.clone(),
                relevance: boosted.relevance,
                score: boosted.composite,
                similarity: similarity * 100.0,
                title_matches: boosted.matches.title,
                metadata_matches: boosted.matches.metadata,
            });
        }

        let status = if !results.is_empty() {
            SearchStatus::Hits
        } else if query_vector.is_degenerate() {
            SearchStatus::DegenerateQuery
        } else {
            SearchStatus::NoResults
        };
        let precision_at_k = high_count as f64 / params.k as f64;
        debug!(query, tokens = tokens.len(), hits = results.len(), high_count, ?status, "search complete");

        Ok(SearchReport { query: query.to_string(), k: params.k, status, precision_at_k, results })
    }

    /// Search with the params this engine was configured with.
    pub fn search_default(&self, query: &str) -> Result<SearchReport, SearchError> {
        self.search(query, self.default_params)
    }
}
