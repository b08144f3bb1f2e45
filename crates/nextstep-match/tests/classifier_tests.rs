use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nextstep_catalog::{load_catalog, Catalog};
use nextstep_core::normalize::normalize;
use nextstep_core::traits::QueryUnderstanding;
use nextstep_core::types::Category;
use nextstep_match::classifier::DELEGATED_CONFIDENCE;
use nextstep_match::QueryClassifier;

fn fixture_catalog() -> Catalog {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    load_catalog(&root.join("test_data/resources.json")).expect("fixture catalog")
}

fn keyword(text: &str) -> (Option<Category>, f32) {
    let c = QueryClassifier::new(0.34).keyword_classify(&normalize(text), &fixture_catalog());
    (c.category, c.confidence)
}

#[test]
fn resolves_single_category_queries() {
    assert_eq!(keyword("I need groceries"), (Some(Category::Food), 1.0));
    assert_eq!(keyword("Necesito comida").0, Some(Category::Food));
    assert_eq!(keyword("Tôi cần bác sĩ").0, Some(Category::Healthcare));
    assert_eq!(keyword("我需要看医生").0, Some(Category::Healthcare));
    assert_eq!(keyword("Where can I find a homeless shelter?").0, Some(Category::Housing));
    assert_eq!(keyword("salud mental").0, Some(Category::MentalHealth));
    assert_eq!(keyword("substance abuse program").0, Some(Category::SubstanceAbuse));
}

#[test]
fn no_keywords_is_unresolved() {
    let (category, confidence) = keyword("hello there");
    assert_eq!(category, None);
    assert_eq!(confidence, 0.0);
}

#[test]
fn ties_prefer_larger_categories_then_lexical_order() {
    // healthcare has two fixture records, telecommunications one
    let (category, confidence) = keyword("phone clinic");
    assert_eq!(category, Some(Category::Healthcare));
    assert!((confidence - 0.5).abs() < 1e-6);

    // dental and transportation both have one record
    assert_eq!(keyword("bus dentist").0, Some(Category::Dental));
}

struct FixedUnderstanding {
    answer: Option<Category>,
    calls: AtomicUsize,
}

#[async_trait]
impl QueryUnderstanding for FixedUnderstanding {
    async fn classify(&self, _text: &str) -> anyhow::Result<Option<Category>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

struct FailingUnderstanding;

#[async_trait]
impl QueryUnderstanding for FailingUnderstanding {
    async fn classify(&self, _text: &str) -> anyhow::Result<Option<Category>> {
        anyhow::bail!("connection refused")
    }
}

struct SlowUnderstanding;

#[async_trait]
impl QueryUnderstanding for SlowUnderstanding {
    async fn classify(&self, _text: &str) -> anyhow::Result<Option<Category>> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(Some(Category::Vision))
    }
}

#[tokio::test]
async fn delegates_only_ambiguous_queries() {
    let catalog = fixture_catalog();
    let service = Arc::new(FixedUnderstanding { answer: Some(Category::Housing), calls: AtomicUsize::new(0) });
    let classifier = QueryClassifier::new(0.34).with_understanding(service.clone(), Duration::from_secs(1));

    let confident = classifier.classify(&normalize("I need groceries"), &catalog).await;
    assert_eq!(confident.category, Some(Category::Food));
    assert_eq!(service.calls.load(Ordering::SeqCst), 0);

    let delegated = classifier.classify(&normalize("somewhere to sleep"), &catalog).await;
    assert_eq!(delegated.category, Some(Category::Housing));
    assert!((delegated.confidence - DELEGATED_CONFIDENCE).abs() < 1e-6);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn undecided_service_keeps_keyword_result() {
    let catalog = fixture_catalog();
    let service = Arc::new(FixedUnderstanding { answer: None, calls: AtomicUsize::new(0) });
    let classifier = QueryClassifier::new(0.34).with_understanding(service, Duration::from_secs(1));
    let result = classifier.classify(&normalize("hello there"), &catalog).await;
    assert_eq!(result.category, None);
}

#[tokio::test]
async fn failing_service_degrades_to_keywords() {
    let catalog = fixture_catalog();
    let classifier = QueryClassifier::new(0.9).with_understanding(Arc::new(FailingUnderstanding), Duration::from_secs(1));
    // 0.5 confidence is below 0.9, so the service is consulted and fails
    let result = classifier.classify(&normalize("phone clinic"), &catalog).await;
    assert_eq!(result.category, Some(Category::Healthcare));
    assert!((result.confidence - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn slow_service_times_out_to_keywords() {
    let catalog = fixture_catalog();
    let classifier =
        QueryClassifier::new(0.34).with_understanding(Arc::new(SlowUnderstanding), Duration::from_millis(20));
    let result = classifier.classify(&normalize("hello there"), &catalog).await;
    assert_eq!(result.category, None);
}
