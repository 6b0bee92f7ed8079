//! Budget configuration: the category list, per-category benchmark ratios and
//! the needs/wants groupings used by the 50/30/20 breakdown.
//!
//! ## Configuration Resolution
//!
//! 1. `FINMIND_CONFIG`, if set
//! 2. `budget.toml` in the platform config dir (~/.config/finmind on Linux)
//! 3. Embedded defaults (compiled into binary)
//!
//! A missing override file falls through to the next layer. An override that
//! exists but does not parse or validate is an error.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../config/budget.toml");

/// Environment variable naming an explicit config file.
pub(crate) const CONFIG_ENV: &str = "FINMIND_CONFIG";

/// The category whose spend counts as designated savings. Never a need or a want.
pub(crate) const SAVINGS_CATEGORY: &str = "Savings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CategoryGroup {
    Need,
    Want,
    Other,
}

impl CategoryGroup {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Need => "Need",
            Self::Want => "Want",
            Self::Other => "Other",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "need" | "needs" => Some(Self::Need),
            "want" | "wants" => Some(Self::Want),
            "other" | "" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryConfig {
    pub(crate) name: String,
    pub(crate) group: CategoryGroup,
    /// Expected monthly spend as a fraction of income.
    pub(crate) benchmark: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetConfig {
    pub(crate) categories: Vec<CategoryConfig>,
    pub(crate) default_benchmark: Decimal,
    pub(crate) default_income: Decimal,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "built-in defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl BudgetConfig {
    /// The defaults compiled into the binary.
    pub(crate) fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Exact-name lookup, as used by the budget engine.
    pub(crate) fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Case-insensitive lookup, for canonicalising user input.
    pub(crate) fn find_category(&self, name: &str) -> Option<&CategoryConfig> {
        let lower = name.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == lower)
    }

    /// Benchmark ratio for a category. Categories that are not configured,
    /// or configured without a ratio, get `default_benchmark`.
    pub(crate) fn benchmark_ratio(&self, name: &str) -> Decimal {
        self.category(name)
            .and_then(|c| c.benchmark)
            .unwrap_or(self.default_benchmark)
    }

    pub(crate) fn needs_set(&self) -> BTreeSet<&str> {
        self.names_in(CategoryGroup::Need)
    }

    pub(crate) fn wants_set(&self) -> BTreeSet<&str> {
        self.names_in(CategoryGroup::Want)
    }

    pub(crate) fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    fn names_in(&self, group: CategoryGroup) -> BTreeSet<&str> {
        self.categories
            .iter()
            .filter(|c| c.group == group)
            .map(|c| c.name.as_str())
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Config("at least one [[category]] is required".into()));
        }
        if self.default_benchmark < Decimal::ZERO {
            return Err(Error::Config("default_benchmark must not be negative".into()));
        }
        if self.default_income < Decimal::ZERO {
            return Err(Error::Config("default_income must not be negative".into()));
        }

        let mut seen = HashSet::new();
        for cat in &self.categories {
            if cat.name.is_empty() {
                return Err(Error::Config("category name must not be empty".into()));
            }
            if !seen.insert(cat.name.to_lowercase()) {
                return Err(Error::Config(format!("duplicate category '{}'", cat.name)));
            }
            let is_savings = cat.name.eq_ignore_ascii_case(SAVINGS_CATEGORY);
            if is_savings && cat.group != CategoryGroup::Other {
                return Err(Error::Config(format!(
                    "'{SAVINGS_CATEGORY}' is the designated savings category and cannot be a {}",
                    cat.group.as_str().to_lowercase()
                )));
            }
            if cat.benchmark.is_some_and(|b| b < Decimal::ZERO) {
                return Err(Error::Config(format!(
                    "benchmark for '{}' must not be negative",
                    cat.name
                )));
            }
        }
        Ok(())
    }
}

/// Default config override path
pub(crate) fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "finmind", "FinMind")
        .map(|d| d.config_dir().join("budget.toml"))
}

/// Resolve and load the active configuration.
pub(crate) fn load() -> Result<(BudgetConfig, ConfigSource)> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        if !explicit.exists() {
            tracing::warn!(
                path = %explicit.display(),
                "{CONFIG_ENV} points at a missing file, using defaults"
            );
        }
        return load_from(Some(&explicit));
    }
    load_from(default_config_path().as_deref())
}

/// Load configuration (override first, then default)
pub(crate) fn load_from(override_path: Option<&Path>) -> Result<(BudgetConfig, ConfigSource)> {
    if let Some(path) = override_path {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config = parse_config(&content)?;
            tracing::info!(
                path = %path.display(),
                categories = config.categories.len(),
                "Loaded budget config"
            );
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }
        tracing::debug!(path = %path.display(), "No config override found");
    }
    Ok((BudgetConfig::embedded()?, ConfigSource::Embedded))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    default_income: Option<f64>,
    default_benchmark: Option<f64>,
    #[serde(default, rename = "category")]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCategory {
    name: String,
    group: Option<String>,
    benchmark: Option<f64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<BudgetConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut categories = Vec::with_capacity(raw.categories.len());
    for cat in raw.categories {
        let mut name = cat.name.trim().to_string();
        // The engine matches savings by exact name
        if name.eq_ignore_ascii_case(SAVINGS_CATEGORY) {
            name = SAVINGS_CATEGORY.to_string();
        }
        let group = match cat.group.as_deref() {
            Some(g) => CategoryGroup::parse(g).ok_or_else(|| {
                Error::Config(format!(
                    "unknown group '{g}' for '{name}' (expected need, want or other)"
                ))
            })?,
            None => CategoryGroup::Other,
        };
        let benchmark = cat
            .benchmark
            .map(|b| to_decimal(b, &format!("benchmark for '{name}'")))
            .transpose()?;
        categories.push(CategoryConfig {
            name,
            group,
            benchmark,
        });
    }

    let config = BudgetConfig {
        categories,
        default_benchmark: match raw.default_benchmark {
            Some(b) => to_decimal(b, "default_benchmark")?,
            None => Decimal::new(5, 2),
        },
        default_income: match raw.default_income {
            Some(i) => to_decimal(i, "default_income")?,
            None => Decimal::ZERO,
        },
    };
    config.validate()?;
    Ok(config)
}

/// TOML floats go through their shortest decimal text so that `0.3` becomes
/// exactly `0.3` rather than its binary approximation.
fn to_decimal(value: f64, field: &str) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(Error::Config(format!("{field} must be a finite number")));
    }
    Decimal::from_str(&value.to_string())
        .map_err(|_| Error::Config(format!("{field} is out of range: {value}")))
}

#[cfg(test)]
mod tests;
