//! nextstep-match
//!
//! Category inference, relevance scoring and ranking over a catalog snapshot.
//! Everything here is deterministic except the optional delegated classifier,
//! which is bounded by a timeout and falls back to the keyword result.

pub mod classifier;
pub mod lexicon;
pub mod rank;
pub mod scorer;
pub mod text;

pub use classifier::QueryClassifier;
pub use rank::{rank, resources_found};
pub use scorer::{RelevanceScorer, ScoringContext};
