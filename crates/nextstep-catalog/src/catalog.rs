use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nextstep_core::error::{Error, Result};
use nextstep_core::types::{Category, CatalogStats, ResourceRecord};

use crate::loader::load_catalog;

/// Immutable, fully validated set of resources in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ResourceRecord>,
    by_category: BTreeMap<Category, Vec<usize>>,
    by_id: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
    source: Option<PathBuf>,
}

impl Catalog {
    pub fn from_records(records: Vec<ResourceRecord>) -> Result<Self> {
        let mut by_category: BTreeMap<Category, Vec<usize>> = BTreeMap::new();
        let mut by_id = HashMap::with_capacity(records.len());
        for (ordinal, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(Error::catalog("<memory>", format!("record '{}' has an empty name", record.id)));
            }
            if by_id.insert(record.id.clone(), ordinal).is_some() {
                return Err(Error::catalog("<memory>", format!("duplicate resource id '{}'", record.id)));
            }
            by_category.entry(record.category).or_default().push(ordinal);
        }
        Ok(Self { records, by_category, by_id, loaded_at: Utc::now(), source: None })
    }

    pub fn empty() -> Self {
        Self { records: Vec::new(), by_category: BTreeMap::new(), by_id: HashMap::new(), loaded_at: Utc::now(), source: None }
    }

    pub(crate) fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn source(&self) -> Option<&Path> { self.source.as_deref() }

    pub fn loaded_at(&self) -> DateTime<Utc> { self.loaded_at }

    /// All records, in load order.
    pub fn get_all_resources(&self) -> &[ResourceRecord] { &self.records }

    pub fn get_by_category(&self, category: Category) -> Vec<&ResourceRecord> {
        self.by_category
            .get(&category)
            .map(|ids| ids.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<&ResourceRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Candidate records paired with their load-order ordinal. `None` yields the whole catalog.
    pub fn candidates(&self, category: Option<Category>) -> Vec<(usize, &ResourceRecord)> {
        match category {
            Some(c) => self
                .by_category
                .get(&c)
                .map(|ids| ids.iter().map(|&i| (i, &self.records[i])).collect())
                .unwrap_or_default(),
            None => self.records.iter().enumerate().collect(),
        }
    }

    /// Categories that have at least one record.
    pub fn all_categories(&self) -> BTreeSet<Category> {
        self.by_category.keys().copied().collect()
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).map_or(0, Vec::len)
    }

    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        self.by_category.iter().map(|(c, ids)| (*c, ids.len())).collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let category_breakdown = self.category_counts();
        CatalogStats {
            total_resources: self.records.len(),
            categories: category_breakdown.len(),
            category_breakdown,
            last_updated: self.loaded_at,
        }
    }
}

/// Shared handle to the current catalog snapshot.
///
/// Readers clone the inner `Arc` and work on that snapshot without holding
/// the lock; a reload builds the new snapshot first and swaps the pointer.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self { current: RwLock::new(Arc::new(catalog)) }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(load_catalog(path)?))
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    /// Publishes `catalog` and returns the snapshot it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Loads `path` completely, then swaps it in. On error the current snapshot is kept.
    pub fn reload_from(&self, path: &Path) -> Result<Arc<Catalog>> {
        let next = Arc::new(load_catalog(path)?);
        *self.current.write() = Arc::clone(&next);
        Ok(next)
    }
}
