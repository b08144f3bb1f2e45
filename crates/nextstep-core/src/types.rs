//! Domain types shared by the catalog, matcher, synthesizer and assistant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::normalize::{normalize, terms};

pub type ResourceId = String;

/// Closed set of resource categories. Adding one is a data-model change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    MentalHealth,
    Healthcare,
    Housing,
    SubstanceAbuse,
    Dental,
    Vision,
    Transportation,
    Education,
    Telecommunications,
    InterpersonalViolence,
}

impl Category {
    /// Declaration order; also the order categories are presented to callers.
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::MentalHealth,
        Category::Healthcare,
        Category::Housing,
        Category::SubstanceAbuse,
        Category::Dental,
        Category::Vision,
        Category::Transportation,
        Category::Education,
        Category::Telecommunications,
        Category::InterpersonalViolence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::MentalHealth => "mental_health",
            Category::Healthcare => "healthcare",
            Category::Housing => "housing",
            Category::SubstanceAbuse => "substance_abuse",
            Category::Dental => "dental",
            Category::Vision => "vision",
            Category::Transportation => "transportation",
            Category::Education => "education",
            Category::Telecommunications => "telecommunications",
            Category::InterpersonalViolence => "interpersonal_violence",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Food => "Food Assistance",
            Category::MentalHealth => "Mental Health",
            Category::Healthcare => "Healthcare",
            Category::Housing => "Housing",
            Category::SubstanceAbuse => "Substance Abuse",
            Category::Dental => "Dental Care",
            Category::Vision => "Vision Care",
            Category::Transportation => "Transportation",
            Category::Education => "Education",
            Category::Telecommunications => "Phone Services",
            Category::InterpersonalViolence => "Domestic Violence",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Food => "🍽️",
            Category::MentalHealth => "🧠",
            Category::Healthcare => "🏥",
            Category::Housing => "🏠",
            Category::SubstanceAbuse => "💊",
            Category::Dental => "🦷",
            Category::Vision => "👁️",
            Category::Transportation => "🚌",
            Category::Education => "📚",
            Category::Telecommunications => "📱",
            Category::InterpersonalViolence => "🛡️",
        }
    }

    pub fn info(self) -> CategoryInfo {
        CategoryInfo { id: self, name: self.display_name().to_string(), icon: self.icon().to_string() }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the snake_case id in any case, with spaces or hyphens standing in for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Presentation metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: Category,
    pub name: String,
    pub icon: String,
}

/// One immutable catalog entry.
///
/// - `id`: stable, unique within a catalog
/// - `keywords`: extra search words from the catalog, kept so the text can be re-indexed
/// - `searchable_text`: normalized name + description + keywords, built once
/// - `terms`: de-duplicated, sorted tokens of `searchable_text`
/// - `name_terms`: tokens of the normalized name, used for the name bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip)]
    pub searchable_text: String,
    #[serde(skip)]
    pub terms: Vec<String>,
    #[serde(skip)]
    pub name_terms: Vec<String>,
}

impl ResourceRecord {
    /// Builds a record and precomputes its search fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        let mut record = Self {
            id: id.into(),
            name: name.into(),
            category,
            description: None,
            address: None,
            phone: None,
            website: None,
            hours: None,
            languages: Vec::new(),
            keywords: Vec::new(),
            searchable_text: String::new(),
            terms: Vec::new(),
            name_terms: Vec::new(),
        };
        record.index_text();
        record
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self.index_text();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self.index_text();
        self
    }

    pub fn with_contact(mut self, address: Option<String>, phone: Option<String>) -> Self {
        self.address = address;
        self.phone = phone;
        self
    }

    /// Rebuilds `searchable_text`, `terms` and `name_terms` from name, description and keywords.
    pub fn index_text(&mut self) {
        let mut raw = self.name.clone();
        if let Some(description) = &self.description {
            raw.push(' ');
            raw.push_str(description);
        }
        for keyword in &self.keywords {
            raw.push(' ');
            raw.push_str(keyword);
        }
        self.searchable_text = normalize(&raw);
        let mut all: Vec<String> = terms(&self.searchable_text).map(str::to_string).collect();
        all.sort();
        all.dedup();
        self.terms = all;
        let mut name: Vec<String> = terms(&normalize(&self.name)).map(str::to_string).collect();
        name.sort();
        name.dedup();
        self.name_terms = name;
    }
}

/// A request-scoped query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub raw_text: String,
    pub normalized_text: String,
    pub category_hint: Option<Category>,
}

impl Query {
    pub fn new(raw_text: &str, category_hint: Option<Category>) -> Self {
        Self { raw_text: raw_text.to_string(), normalized_text: normalize(raw_text), category_hint }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_text.is_empty()
    }
}

/// Outcome of category inference. `category: None` means "search everything".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Option<Category>,
    pub confidence: f32,
}

impl Classification {
    pub const UNRESOLVED: Classification = Classification { category: None, confidence: 0.0 };

    pub fn resolved(category: Category, confidence: f32) -> Self {
        Self { category: Some(category), confidence: confidence.clamp(0.0, 1.0) }
    }
}

/// Score of one (query, record) pair.
///
/// `ordinal` is the record's position in catalog load order and breaks ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub resource_id: ResourceId,
    pub score: f32,
    pub matched_category: Option<Category>,
    pub ordinal: usize,
}

/// A ranked resource as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResource {
    pub record: ResourceRecord,
    pub score: f32,
}

/// Result of one `chat` call. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub query: String,
    pub response_text: String,
    pub resources_found: usize,
    pub top_resources: Vec<RankedResource>,
    pub resolved_category: Option<Category>,
}

/// Snapshot statistics for introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_resources: usize,
    pub categories: usize,
    pub category_breakdown: BTreeMap<Category, usize>,
    pub last_updated: DateTime<Utc>,
}
