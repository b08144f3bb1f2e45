use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use nextstep_catalog::Catalog;
use nextstep_core::normalize::{normalize, terms};
use nextstep_core::traits::QueryUnderstanding;
use nextstep_core::types::{Category, Classification};

use crate::lexicon;
use crate::text::is_unspaced;

/// Confidence attached to a category chosen by the delegated service.
pub const DELEGATED_CONFIDENCE: f32 = 0.9;

const PREFIX_MIN_CHARS: usize = 4;

#[derive(Debug, Clone)]
struct Keyword {
    text: String,
    phrase: bool,
    prefix: bool,
}

impl Keyword {
    fn new(raw: &str) -> Option<Self> {
        let text = normalize(raw);
        if text.is_empty() { return None; }
        let phrase = text.contains(' ') || is_unspaced(&text);
        let prefix = !phrase && text.chars().count() >= PREFIX_MIN_CHARS;
        Some(Self { text, phrase, prefix })
    }

    /// `padded` is the normalized query wrapped in single spaces.
    fn matches(&self, padded: &str, query_terms: &[&str]) -> bool {
        if self.phrase {
            if is_unspaced(&self.text) {
                return padded.contains(self.text.as_str());
            }
            return padded.contains(&format!(" {} ", self.text));
        }
        query_terms.iter().any(|t| *t == self.text || (self.prefix && t.starts_with(self.text.as_str())))
    }
}

/// Maps normalized query text to at most one category.
///
/// Keyword hits decide first. When that is ambiguous (no hits, or confidence
/// under `min_confidence`) and an understanding service is attached, the
/// service is asked under `timeout`; any failure keeps the keyword result.
pub struct QueryClassifier {
    lexicon: Vec<(Category, Vec<Keyword>)>,
    min_confidence: f32,
    understanding: Option<Arc<dyn QueryUnderstanding>>,
    timeout: Duration,
}

impl QueryClassifier {
    pub fn new(min_confidence: f32) -> Self {
        let lexicon = Category::ALL
            .into_iter()
            .map(|c| (c, lexicon::keywords(c).iter().filter_map(|k| Keyword::new(k)).collect()))
            .collect();
        Self { lexicon, min_confidence, understanding: None, timeout: Duration::from_secs(3) }
    }

    pub fn with_understanding(mut self, service: Arc<dyn QueryUnderstanding>, timeout: Duration) -> Self {
        self.understanding = Some(service);
        self.timeout = timeout;
        self
    }

    pub fn min_confidence(&self) -> f32 { self.min_confidence }

    /// Distinct keyword hits per category; categories without hits are absent.
    pub fn category_hits(&self, normalized: &str) -> BTreeMap<Category, usize> {
        let padded = format!(" {normalized} ");
        let query_terms: Vec<&str> = terms(normalized).collect();
        self.lexicon
            .iter()
            .filter_map(|(category, keywords)| {
                let hits = keywords.iter().filter(|k| k.matches(&padded, &query_terms)).count();
                (hits > 0).then_some((*category, hits))
            })
            .collect()
    }

    /// Keyword-only classification. Ties on hit count go to the category with
    /// more catalog records, then to the lexically smaller category id.
    pub fn keyword_classify(&self, normalized: &str, catalog: &Catalog) -> Classification {
        let hits = self.category_hits(normalized);
        let total: usize = hits.values().sum();
        let best = hits.iter().max_by(|(a, a_hits), (b, b_hits)| {
            a_hits
                .cmp(b_hits)
                .then_with(|| catalog.category_count(**a).cmp(&catalog.category_count(**b)))
                .then_with(|| b.as_str().cmp(a.as_str()))
        });
        match best {
            Some((category, best_hits)) if total > 0 => {
                Classification::resolved(*category, *best_hits as f32 / total as f32)
            }
            _ => Classification::UNRESOLVED,
        }
    }

    pub fn is_confident(&self, classification: &Classification) -> bool {
        classification.category.is_some() && classification.confidence >= self.min_confidence
    }

    /// Full classification: keywords, then the delegated service for ambiguous input.
    pub async fn classify(&self, normalized: &str, catalog: &Catalog) -> Classification {
        let keyword = self.keyword_classify(normalized, catalog);
        if self.is_confident(&keyword) {
            return keyword;
        }
        let Some(service) = &self.understanding else {
            return keyword;
        };
        match tokio::time::timeout(self.timeout, service.classify(normalized)).await {
            Ok(Ok(Some(category))) => {
                tracing::debug!(%category, "category resolved by understanding service");
                Classification::resolved(category, DELEGATED_CONFIDENCE)
            }
            Ok(Ok(None)) => keyword,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "understanding service failed; using keyword classification");
                keyword
            }
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "understanding service timed out; using keyword classification");
                keyword
            }
        }
    }
}
