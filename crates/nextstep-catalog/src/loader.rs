use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use twox_hash::XxHash64;

use nextstep_core::error::{Error, Result};
use nextstep_core::types::{Category, ResourceRecord};

use crate::catalog::Catalog;

/// A catalog entry as written on disk, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<RawRecord>),
    Wrapped { resources: Vec<RawRecord> },
}

impl RawRecord {
    /// Validates the entry and precomputes its search fields.
    pub fn into_record(self, source: &Path, index: usize) -> Result<ResourceRecord> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::catalog(source, format!("record #{index} has an empty name")));
        }
        let category: Category = self
            .category
            .parse()
            .map_err(|e| Error::catalog(source, format!("record #{index} ('{name}'): {e}")))?;
        let id = match self.id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(id) => id,
            None => derive_id(category, &name),
        };
        let mut record = ResourceRecord::new(id, name, category);
        record.description = non_blank(self.description);
        record.address = non_blank(self.address);
        record.phone = non_blank(self.phone);
        record.website = non_blank(self.website);
        record.hours = non_blank(self.hours);
        record.languages = self.languages;
        record.keywords = self.keywords;
        record.index_text();
        Ok(record)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Stable id for records that ship without one: xxHash64 of `category|name`.
pub fn derive_id(category: Category, name: &str) -> String {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(category.as_str().as_bytes());
    hasher.write(b"|");
    hasher.write(name.as_bytes());
    format!("res-{:016x}", hasher.finish())
}

/// Reads catalog records from a JSON file or a directory of JSON files.
#[derive(Default)]
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn new() -> Self { Self }

    /// Loads every record under `path` in load order. Fails on the first invalid record.
    pub fn load_records(&self, path: &Path) -> Result<Vec<ResourceRecord>> {
        if !path.exists() {
            return Err(Error::catalog(path, "catalog source does not exist"));
        }
        let files = if path.is_dir() { self.list_json_files(path) } else { vec![path.to_path_buf()] };
        if files.is_empty() {
            return Err(Error::catalog(path, "no .json files found"));
        }
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        for file in &files {
            let raw = self.read_file(file)?;
            tracing::debug!(file = %file.display(), records = raw.len(), "read catalog file");
            for (index, entry) in raw.into_iter().enumerate() {
                let record = entry.into_record(file, index)?;
                if !seen.insert(record.id.clone()) {
                    return Err(Error::catalog(file, format!("duplicate resource id '{}'", record.id)));
                }
                records.push(record);
            }
        }
        Ok(records)
    }

    fn read_file(&self, file: &Path) -> Result<Vec<RawRecord>> {
        let content = fs::read_to_string(file).map_err(|e| Error::catalog(file, e.to_string()))?;
        let parsed: CatalogFile = serde_json::from_str(&content)
            .map_err(|e| Error::catalog(file, format!("invalid catalog JSON: {e}")))?;
        Ok(match parsed {
            CatalogFile::List(records) => records,
            CatalogFile::Wrapped { resources } => resources,
        })
    }

    fn list_json_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
        }
        json_files.sort();
        json_files
    }
}

/// Loads and validates a full catalog snapshot from `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let records = CatalogLoader::new().load_records(path)?;
    let catalog = Catalog::from_records(records)?.with_source(path);
    tracing::info!(
        path = %path.display(),
        resources = catalog.len(),
        categories = catalog.all_categories().len(),
        "catalog loaded"
    );
    Ok(catalog)
}
