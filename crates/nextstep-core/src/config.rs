//! Lightweight configuration loader, typed settings and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys separated by `__`, e.g. `APP_RANKING__LIMIT=3`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_for_env(None)
    }

    pub fn load_for_env(env: Option<&str>) -> anyhow::Result<Self> {
        let env_name = match env {
            Some(name) => name.to_string(),
            None => env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string()),
        };

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate_for_env(&env_name)?;
        Ok(config)
    }

    /// Builds a configuration from inline TOML layered over the defaults.
    pub fn from_toml_str(toml: &str) -> Self {
        let figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string(toml));
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extracts and validates the full settings tree.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        match env {
            "prod" | "production" => {
                let enabled: bool = self.get("services.enabled").unwrap_or(true);
                if !enabled {
                    tracing::warn!("production config has external services disabled; replies use templates only");
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub ranking: RankingSettings,
    pub scoring: ScoringWeights,
    pub services: ServiceSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.catalog.path.trim().is_empty() {
            return Err(Error::InvalidConfig("catalog.path must not be empty".into()));
        }
        if self.ranking.limit == 0 {
            return Err(Error::InvalidConfig("ranking.limit must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.ranking.min_confidence) {
            return Err(Error::InvalidConfig(format!(
                "ranking.min_confidence must be within [0, 1], got {}",
                self.ranking.min_confidence
            )));
        }
        self.scoring.validate()?;
        if self.services.timeout_ms == 0 {
            return Err(Error::InvalidConfig("services.timeout_ms must be positive".into()));
        }
        if self.services.max_response_chars == 0 {
            return Err(Error::InvalidConfig("services.max_response_chars must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON file or directory of JSON files. `~` and `$VAR` are expanded.
    pub path: String,
}

impl CatalogSettings {
    pub fn resolved_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.path)
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: "data/resources.json".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    pub limit: usize,
    /// Classifications below this confidence search every category.
    pub min_confidence: f32,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self { limit: 5, min_confidence: 0.34 }
    }
}

/// Tunable relevance weights. Scores are sums of non-negative terms so
/// adding overlapping query terms never lowers a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Credit per query term found verbatim in the record's terms.
    pub exact_weight: f32,
    /// Credit per query term matched only by prefix, containment or one edit.
    pub fuzzy_weight: f32,
    /// Extra credit per query term that appears in the record name.
    pub name_weight: f32,
    /// Applied to records of the preferred category when results were not
    /// already filtered to that category.
    pub category_multiplier: f32,
    /// Shortest term (in chars) eligible for fuzzy credit.
    pub fuzzy_min_chars: usize,
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("exact_weight", self.exact_weight),
            ("fuzzy_weight", self.fuzzy_weight),
            ("name_weight", self.name_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("scoring.{name} must be a non-negative number, got {value}")));
            }
        }
        if !self.category_multiplier.is_finite() || self.category_multiplier < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "scoring.category_multiplier must be >= 1, got {}",
                self.category_multiplier
            )));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { exact_weight: 1.0, fuzzy_weight: 0.5, name_weight: 0.25, category_multiplier: 1.5, fuzzy_min_chars: 4 }
    }
}

/// Connection settings for the OpenAI-compatible text services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_ms: u64,
    pub max_response_chars: usize,
    pub max_tokens: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_ms: 3000,
            max_response_chars: 1200,
            max_tokens: 400,
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
