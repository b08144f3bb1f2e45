use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use nextstep_catalog::loader::derive_id;
use nextstep_catalog::{load_catalog, Catalog, CatalogHandle};
use nextstep_core::error::Error;
use nextstep_core::types::{Category, ResourceRecord};

fn fixture_path() -> PathBuf {
    // crates/nextstep-catalog -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    root.join("test_data/resources.json")
}

#[test]
fn loads_fixture_in_file_order() {
    let catalog = load_catalog(&fixture_path()).expect("catalog");
    assert_eq!(catalog.len(), 15);
    let all = catalog.get_all_resources();
    assert_eq!(all[0].id, "food-001");
    assert_eq!(all[12].id, "iv-001");
    assert_eq!(all[14].id, "hs-010");
    assert_eq!(catalog.all_categories().len(), Category::ALL.len());
    assert_eq!(catalog.category_count(Category::Food), 3);
    assert_eq!(catalog.category_count(Category::Healthcare), 2);

    let food = catalog.get_by_category(Category::Food);
    assert_eq!(food.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["food-001", "food-002", "food-010"]);

    let bank = catalog.get("food-001").expect("by id");
    assert!(bank.searchable_text.contains("food bank groceries"));
    assert!(bank.terms.iter().any(|t| t == "despensa"));

    let chinese = catalog.get("food-010").expect("by id");
    assert!(chinese.terms.iter().any(|t| t == "食物"));
    let arabic = catalog.get("hs-010").expect("by id");
    // hamza seats fold away: "مأوى" is indexed as "ماوى"
    assert!(arabic.terms.iter().any(|t| t == "ماوى"));
}

#[test]
fn stats_break_down_by_category() {
    let catalog = load_catalog(&fixture_path()).expect("catalog");
    let stats = catalog.stats();
    assert_eq!(stats.total_resources, 15);
    assert_eq!(stats.categories, 11);
    assert_eq!(stats.category_breakdown[&Category::Food], 3);
    assert_eq!(stats.category_breakdown.values().sum::<usize>(), 15);
    assert_eq!(stats.last_updated, catalog.loaded_at());
}

#[test]
fn missing_source_is_a_load_error() {
    let tmp = TempDir::new().unwrap();
    let err = load_catalog(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::CatalogLoad { .. }));
}

#[test]
fn unknown_category_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.json");
    fs::write(&path, r#"[{"id": "x", "name": "Somewhere", "category": "legal"}]"#).unwrap();
    let err = load_catalog(&path).unwrap_err();
    match err {
        Error::CatalogLoad { reason, .. } => assert!(reason.contains("legal"), "{reason}"),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn empty_name_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.json");
    fs::write(&path, r#"{"resources": [{"name": "  ", "category": "food"}]}"#).unwrap();
    assert!(matches!(load_catalog(&path), Err(Error::CatalogLoad { .. })));
}

#[test]
fn duplicate_ids_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dup.json");
    fs::write(
        &path,
        r#"[{"id": "a", "name": "One", "category": "food"}, {"id": "a", "name": "Two", "category": "housing"}]"#,
    )
    .unwrap();
    assert!(matches!(load_catalog(&path), Err(Error::CatalogLoad { .. })));
}

#[test]
fn malformed_json_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_catalog(&path), Err(Error::CatalogLoad { .. })));
}

#[test]
fn directory_sources_concatenate_sorted_files() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("nested")).unwrap();
    fs::write(tmp.path().join("b.json"), r#"[{"name": "Bravo Pantry", "category": "food"}]"#).unwrap();
    fs::write(tmp.path().join("a.json"), r#"[{"name": "Alpha Clinic", "category": "Healthcare"}]"#).unwrap();
    fs::write(tmp.path().join("nested/c.json"), r#"[{"name": "Charlie Shelter", "category": "housing"}]"#).unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let catalog = load_catalog(tmp.path()).expect("catalog");
    let names: Vec<_> = catalog.get_all_resources().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha Clinic", "Bravo Pantry", "Charlie Shelter"]);
    assert_eq!(catalog.get_all_resources()[0].id, derive_id(Category::Healthcare, "Alpha Clinic"));
}

#[test]
fn derived_ids_are_stable() {
    let a = derive_id(Category::Food, "Houston Food Bank");
    assert_eq!(a, derive_id(Category::Food, "Houston Food Bank"));
    assert_ne!(a, derive_id(Category::Housing, "Houston Food Bank"));
    assert!(a.starts_with("res-") && a.len() == 20);
}

#[test]
fn in_memory_catalog_rejects_duplicates() {
    let records = vec![
        ResourceRecord::new("a", "One", Category::Food),
        ResourceRecord::new("a", "Two", Category::Food),
    ];
    assert!(Catalog::from_records(records).is_err());
}

#[test]
fn reload_swaps_whole_snapshots() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    fs::write(&path, r#"[{"id": "a", "name": "Alpha Pantry", "category": "food"}]"#).unwrap();
    let handle = CatalogHandle::open(&path).expect("open");
    let before = handle.snapshot();
    assert_eq!(before.len(), 1);

    fs::write(
        &path,
        r#"[{"id": "a", "name": "Alpha Pantry", "category": "food"}, {"id": "b", "name": "Beta Shelter", "category": "housing"}]"#,
    )
    .unwrap();
    let after = handle.reload_from(&path).expect("reload");
    assert_eq!(after.len(), 2);
    // readers holding the old snapshot keep seeing it unchanged
    assert_eq!(before.len(), 1);
    assert!(Arc::ptr_eq(&after, &handle.snapshot()));

    fs::write(&path, r#"[{"id": "c", "name": "Broken", "category": "legal"}]"#).unwrap();
    assert!(handle.reload_from(&path).is_err());
    assert_eq!(handle.snapshot().len(), 2, "failed reload keeps the current snapshot");
}
