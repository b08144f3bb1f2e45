use nextstep_core::config::ScoringWeights;
use nextstep_core::types::{Category, ResourceRecord, ScoredMatch};

use crate::text::{is_unspaced, query_terms, within_one_edit};

const UNSPACED_MIN_CHARS: usize = 2;
const EDIT_MIN_CHARS: usize = 5;

/// How candidates were selected for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringContext {
    /// Category the candidate set was restricted to, if any.
    pub filter: Option<Category>,
    /// Best-guess category when the search was left open. Ignored when `filter` is set.
    pub preferred: Option<Category>,
}

impl ScoringContext {
    pub fn filtered(category: Category) -> Self {
        Self { filter: Some(category), preferred: None }
    }

    pub fn open(preferred: Option<Category>) -> Self {
        Self { filter: None, preferred }
    }

    fn boosts(&self, category: Category) -> bool {
        self.filter.is_none() && self.preferred == Some(category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TermMatch {
    Exact,
    Fuzzy,
    Miss,
}

/// Deterministic relevance of a record to a query.
///
/// Each distinct query term contributes `exact_weight` or `fuzzy_weight`,
/// plus `name_weight` when it also matches the record name. The sum is then
/// scaled by `category_multiplier` for the preferred category on open
/// searches. Every contribution is non-negative, so a record's score never
/// drops when the query gains terms it shares.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights) -> Self { Self { weights } }

    pub fn weights(&self) -> &ScoringWeights { &self.weights }

    /// Score of one record for already-extracted query terms.
    pub fn score_terms(&self, terms: &[String], record: &ResourceRecord, ctx: &ScoringContext) -> f32 {
        let mut score = 0.0f32;
        let name_text = record.name_terms.join(" ");
        for term in terms {
            let credit = match self.match_term(term, &record.terms, &record.searchable_text) {
                TermMatch::Exact => self.weights.exact_weight,
                TermMatch::Fuzzy => self.weights.fuzzy_weight,
                TermMatch::Miss => continue,
            };
            score += credit;
            if self.match_term(term, &record.name_terms, &name_text) != TermMatch::Miss {
                score += self.weights.name_weight;
            }
        }
        if score > 0.0 && ctx.boosts(record.category) {
            score *= self.weights.category_multiplier;
        }
        score
    }

    /// Score of one record for a normalized query string.
    pub fn score(&self, normalized_query: &str, record: &ResourceRecord, ctx: &ScoringContext) -> f32 {
        self.score_terms(&query_terms(normalized_query), record, ctx)
    }

    /// Scores every candidate; `candidates` pairs each record with its load-order ordinal.
    pub fn score_all(
        &self,
        normalized_query: &str,
        candidates: &[(usize, &ResourceRecord)],
        ctx: &ScoringContext,
    ) -> Vec<ScoredMatch> {
        let terms = query_terms(normalized_query);
        candidates
            .iter()
            .map(|(ordinal, record)| ScoredMatch {
                resource_id: record.id.clone(),
                score: self.score_terms(&terms, record, ctx),
                matched_category: ctx.filter,
                ordinal: *ordinal,
            })
            .collect()
    }

    /// `record_terms` must be sorted; `text` is the space-joined form used for unspaced scripts.
    fn match_term(&self, term: &str, record_terms: &[String], text: &str) -> TermMatch {
        let unspaced = is_unspaced(term);
        if record_terms.binary_search_by(|t| t.as_str().cmp(term)).is_ok() {
            return TermMatch::Exact;
        }
        if unspaced && term.chars().count() >= UNSPACED_MIN_CHARS && text.contains(term) {
            return TermMatch::Exact;
        }

        let term_len = term.chars().count();
        let min_len = if unspaced { UNSPACED_MIN_CHARS } else { self.weights.fuzzy_min_chars.max(1) };
        if term_len < min_len {
            return TermMatch::Miss;
        }
        let fuzzy = record_terms.iter().any(|candidate| {
            let candidate_len = candidate.chars().count();
            if candidate.starts_with(term) {
                return true;
            }
            if candidate_len >= min_len && (term.starts_with(candidate.as_str()) || (unspaced && term.contains(candidate.as_str()))) {
                return true;
            }
            !unspaced && term_len >= EDIT_MIN_CHARS && candidate_len >= EDIT_MIN_CHARS && within_one_edit(term, candidate)
        });
        if fuzzy { TermMatch::Fuzzy } else { TermMatch::Miss }
    }
}
