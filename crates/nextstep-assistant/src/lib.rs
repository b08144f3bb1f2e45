use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use nextstep_catalog::{Catalog, CatalogHandle};
use nextstep_core::config::Settings;
use nextstep_core::error::{Error, Result};
use nextstep_core::traits::{QueryUnderstanding, TextGenerator};
use nextstep_core::types::{
    Category, CatalogStats, CategoryInfo, ChatResult, Query, RankedResource, ResourceRecord,
};
use nextstep_llm::ResponseSynthesizer;
use nextstep_match::{rank, resources_found, QueryClassifier, RelevanceScorer, ScoringContext};

/// Request-scoped matching over a shared catalog handle.
///
/// Holds no per-request state; `chat` can run concurrently from any number
/// of tasks. Each call works on the snapshot current when it started.
pub struct Assistant {
    catalog: Arc<CatalogHandle>,
    classifier: QueryClassifier,
    scorer: RelevanceScorer,
    synthesizer: ResponseSynthesizer,
    limit: usize,
    service_timeout: Duration,
    max_response_chars: usize,
}

impl Assistant {
    /// Keyword classification and template replies only.
    pub fn new(catalog: Arc<CatalogHandle>, settings: &Settings) -> Self {
        let service_timeout = Duration::from_millis(settings.services.timeout_ms);
        Self {
            catalog,
            classifier: QueryClassifier::new(settings.ranking.min_confidence),
            scorer: RelevanceScorer::new(settings.scoring.clone()),
            synthesizer: ResponseSynthesizer::new(None, service_timeout, settings.services.max_response_chars),
            limit: settings.ranking.limit.max(1),
            service_timeout,
            max_response_chars: settings.services.max_response_chars,
        }
    }

    /// Loads the catalog named in `settings` (relative to `base`) and attaches
    /// the network services when they are configured.
    pub fn from_settings(settings: &Settings, base: &Path) -> anyhow::Result<Self> {
        settings.validate()?;
        let path = settings.catalog.resolved_path(base);
        let catalog = Arc::new(CatalogHandle::open(&path)?);
        let mut assistant = Self::new(catalog, settings);
        if let Some(generator) = nextstep_llm::get_default_generator(&settings.services)? {
            assistant = assistant.with_generator(generator);
        }
        if let Some(understanding) = nextstep_llm::get_default_understanding(&settings.services)? {
            assistant = assistant.with_understanding(understanding);
        }
        Ok(assistant)
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.synthesizer = ResponseSynthesizer::new(Some(generator), self.service_timeout, self.max_response_chars);
        self
    }

    pub fn with_understanding(mut self, understanding: Arc<dyn QueryUnderstanding>) -> Self {
        self.classifier = self.classifier.with_understanding(understanding, self.service_timeout);
        self
    }

    pub fn limit(&self) -> usize { self.limit }

    pub fn catalog(&self) -> &Arc<CatalogHandle> { &self.catalog }

    /// Matches `message` against the catalog and builds the reply.
    ///
    /// A valid `category` restricts the candidates; an unknown one is ignored.
    /// Fails only when the message is empty after normalization.
    pub async fn chat(&self, message: &str, category: Option<&str>) -> Result<ChatResult> {
        let query = Query::new(message, category.and_then(parse_hint));
        if query.is_empty() {
            return Err(Error::InvalidInput("message is empty".to_string()));
        }
        let catalog = self.catalog.snapshot();
        let ctx = self.resolve(&query, &catalog).await;

        let candidates = catalog.candidates(ctx.filter);
        let scored = self.scorer.score_all(&query.normalized_text, &candidates, &ctx);
        let found = resources_found(&scored);
        let records = catalog.get_all_resources();
        let top_resources: Vec<RankedResource> = rank(scored, self.limit)
            .into_iter()
            .filter_map(|m| records.get(m.ordinal).map(|r| RankedResource { record: r.clone(), score: m.score }))
            .collect();
        tracing::debug!(
            category = ?ctx.filter,
            preferred = ?ctx.preferred,
            candidates = candidates.len(),
            found,
            returned = top_resources.len(),
            "matched query"
        );

        let response_text = self.synthesizer.synthesize(&query.raw_text, &top_resources, found).await;
        Ok(ChatResult {
            query: query.raw_text,
            response_text,
            resources_found: found,
            top_resources,
            resolved_category: ctx.filter,
        })
    }

    async fn resolve(&self, query: &Query, catalog: &Catalog) -> ScoringContext {
        if let Some(category) = query.category_hint {
            return ScoringContext::filtered(category);
        }
        let classification = self.classifier.classify(&query.normalized_text, catalog).await;
        match classification.category {
            Some(category) if self.classifier.is_confident(&classification) => ScoringContext::filtered(category),
            preferred => ScoringContext::open(preferred),
        }
    }

    /// Every record of the current snapshot, in load order.
    pub fn get_all_resources(&self) -> Vec<ResourceRecord> {
        self.catalog.snapshot().get_all_resources().to_vec()
    }

    pub fn get_by_category(&self, category: Category) -> Vec<ResourceRecord> {
        self.catalog.snapshot().get_by_category(category).into_iter().cloned().collect()
    }

    pub fn stats(&self) -> CatalogStats {
        self.catalog.snapshot().stats()
    }

    pub fn categories(&self) -> Vec<CategoryInfo> {
        Category::ALL.iter().map(|c| c.info()).collect()
    }

    /// Replaces the catalog with the one at `path`. The current one is kept on error.
    pub fn reload(&self, path: &Path) -> Result<CatalogStats> {
        let catalog = self.catalog.reload_from(path)?;
        Ok(catalog.stats())
    }
}

fn parse_hint(raw: &str) -> Option<Category> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(category) => Some(category),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring category hint");
            None
        }
    }
}
