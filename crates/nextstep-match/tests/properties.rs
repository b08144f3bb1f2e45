use std::path::PathBuf;
use std::sync::OnceLock;

use proptest::prelude::*;

use nextstep_catalog::{load_catalog, Catalog};
use nextstep_core::normalize::normalize;
use nextstep_core::types::{Category, ScoredMatch};
use nextstep_match::{rank, resources_found, RelevanceScorer, ScoringContext};

const VOCAB: &[&str] = &[
    "food", "groceries", "pantry", "clinic", "doctor", "shelter", "housing", "bus", "fare", "dentist",
    "teeth", "glasses", "phone", "internet", "counseling", "crisis", "recovery", "ged", "hotline",
    "houston", "comida", "refugio", "grocerie", "clinc", "need", "help", "the", "zebra", "quantum",
    "食物", "银行", "免费", "杂货", "我需要", "医生", "住房", "مأوى", "سكن", "طبيب", "احتاج",
];

const UNSPACED_VOCAB: &[&str] = &["食物", "银行", "免费", "杂货", "我", "需要", "医生", "华人", "饿", "住房", "食"];

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
        load_catalog(&root.join("test_data/resources.json")).expect("fixture catalog")
    })
}

fn words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..6)
}

fn unspaced_words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(UNSPACED_VOCAB), 0..5)
}

fn context() -> impl Strategy<Value = ScoringContext> {
    prop_oneof![
        Just(ScoringContext::default()),
        prop::sample::select(Category::ALL.to_vec()).prop_map(|c| ScoringContext::open(Some(c))),
    ]
}

proptest! {
    #[test]
    fn adding_query_terms_never_lowers_a_score(base in words(), extra in words(), ctx in context()) {
        let scorer = RelevanceScorer::default();
        let short = normalize(&base.join(" "));
        let long = normalize(&format!("{} {}", base.join(" "), extra.join(" ")));
        for record in catalog().get_all_resources() {
            let before = scorer.score(&short, record, &ctx);
            let after = scorer.score(&long, record, &ctx);
            prop_assert!(after >= before, "{} -> {} for {:?} / {:?}", before, after, record.id, long);
            prop_assert!(before >= 0.0);
        }
    }

    #[test]
    fn extending_an_unspaced_sentence_never_lowers_a_score(base in unspaced_words(), extra in unspaced_words(), ctx in context()) {
        let scorer = RelevanceScorer::default();
        let short = normalize(&base.concat());
        let long = normalize(&format!("{}{}", base.concat(), extra.concat()));
        for record in catalog().get_all_resources() {
            let before = scorer.score(&short, record, &ctx);
            let after = scorer.score(&long, record, &ctx);
            prop_assert!(after >= before, "{} -> {} for {:?} / {:?}", before, after, record.id, long);
        }
    }

    #[test]
    fn ranking_is_bounded_sorted_and_positive(query in words(), limit in 1usize..8) {
        let scorer = RelevanceScorer::default();
        let normalized = normalize(&query.join(" "));
        let candidates = catalog().candidates(None);
        let scored = scorer.score_all(&normalized, &candidates, &ScoringContext::default());
        let found = resources_found(&scored);
        let ranked = rank(scored.clone(), limit);

        prop_assert!(ranked.len() <= limit);
        prop_assert_eq!(ranked.len(), found.min(limit));
        prop_assert!(ranked.iter().all(|m| m.score > 0.0));
        prop_assert!(ranked.windows(2).all(|w| w[0].score > w[1].score
            || (w[0].score == w[1].score && w[0].ordinal < w[1].ordinal)));

        // identical input, identical output
        let again = rank(scorer.score_all(&normalized, &candidates, &ScoringContext::default()), limit);
        prop_assert_eq!(ranked, again);
    }

    #[test]
    fn rank_keeps_the_highest_scores(scores in prop::collection::vec(0.0f32..5.0, 0..20), limit in 1usize..6) {
        let matches: Vec<ScoredMatch> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| ScoredMatch { resource_id: format!("r{i}"), score: *s, matched_category: None, ordinal: i })
            .collect();
        let ranked = rank(matches, limit);
        let mut positive: Vec<f32> = scores.iter().copied().filter(|s| *s > 0.0).collect();
        positive.sort_by(|a, b| b.total_cmp(a));
        positive.truncate(limit);
        prop_assert_eq!(ranked.iter().map(|m| m.score).collect::<Vec<_>>(), positive);
    }
}
