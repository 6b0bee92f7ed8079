#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::io::Write;

use super::*;

fn make_config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const MINIMAL: &str = r#"
default_income = 3000
default_benchmark = 0.04

[[category]]
name = "Rent"
group = "need"
benchmark = 0.35

[[category]]
name = "Fun"
group = "want"

[[category]]
name = "Savings"
"#;

// ── Embedded defaults ─────────────────────────────────────────

#[test]
fn test_embedded_config_parses() {
    let config = BudgetConfig::embedded().unwrap();
    assert_eq!(config.default_income, dec!(5000));
    assert_eq!(config.default_benchmark, dec!(0.05));
    assert_eq!(
        config.category_names(),
        vec!["Housing", "Transportation", "Debt", "Food", "Entertainment", "Savings", "Other"]
    );
}

#[test]
fn test_embedded_groups() {
    let config = BudgetConfig::embedded().unwrap();
    let needs: Vec<&str> = config.needs_set().into_iter().collect();
    let wants: Vec<&str> = config.wants_set().into_iter().collect();
    assert_eq!(needs, vec!["Debt", "Housing", "Transportation"]);
    assert_eq!(wants, vec!["Entertainment", "Food"]);
    assert!(!config.needs_set().contains(SAVINGS_CATEGORY));
    assert!(!config.wants_set().contains(SAVINGS_CATEGORY));
}

#[test]
fn test_embedded_benchmarks_are_exact() {
    let config = BudgetConfig::embedded().unwrap();
    assert_eq!(config.benchmark_ratio("Housing"), dec!(0.30));
    assert_eq!(config.benchmark_ratio("Food"), dec!(0.12));
    assert_eq!(config.benchmark_ratio("Savings"), dec!(0.20));
}

// ── Lookups ───────────────────────────────────────────────────

#[test]
fn test_benchmark_ratio_unknown_category_uses_default() {
    let config = BudgetConfig::embedded().unwrap();
    assert_eq!(config.benchmark_ratio("Pets"), dec!(0.05));
}

#[test]
fn test_benchmark_ratio_is_case_sensitive() {
    let config = BudgetConfig::embedded().unwrap();
    assert_eq!(config.benchmark_ratio("housing"), config.default_benchmark);
}

#[test]
fn test_benchmark_ratio_category_without_ratio_uses_default() {
    let config = parse_config(MINIMAL).unwrap();
    assert_eq!(config.benchmark_ratio("Fun"), dec!(0.04));
    assert_eq!(config.benchmark_ratio("Rent"), dec!(0.35));
}

#[test]
fn test_find_category_case_insensitive() {
    let config = BudgetConfig::embedded().unwrap();
    assert_eq!(config.find_category("housing").unwrap().name, "Housing");
    assert_eq!(config.find_category("  FOOD ").unwrap().name, "Food");
    assert!(config.find_category("Pets").is_none());
}

#[test]
fn test_category_exact_lookup() {
    let config = BudgetConfig::embedded().unwrap();
    assert!(config.category("Housing").is_some());
    assert!(config.category("housing").is_none());
}

#[test]
fn test_category_group_parse() {
    assert_eq!(CategoryGroup::parse("need"), Some(CategoryGroup::Need));
    assert_eq!(CategoryGroup::parse("Wants"), Some(CategoryGroup::Want));
    assert_eq!(CategoryGroup::parse("other"), Some(CategoryGroup::Other));
    assert_eq!(CategoryGroup::parse("luxury"), None);
}

// ── Parsing ───────────────────────────────────────────────────

#[test]
fn test_parse_minimal() {
    let config = parse_config(MINIMAL).unwrap();
    assert_eq!(config.default_income, dec!(3000));
    assert_eq!(config.default_benchmark, dec!(0.04));
    assert_eq!(config.categories.len(), 3);
    assert_eq!(config.category("Savings").unwrap().group, CategoryGroup::Other);
}

#[test]
fn test_parse_missing_defaults() {
    let config = parse_config("[[category]]\nname = \"Rent\"\n").unwrap();
    assert_eq!(config.default_benchmark, dec!(0.05));
    assert_eq!(config.default_income, dec!(0));
}

#[test]
fn test_parse_invalid_toml() {
    assert!(matches!(parse_config("this is = = not toml"), Err(Error::Toml(_))));
}

#[test]
fn test_parse_unknown_field_rejected() {
    let content = "[[category]]\nname = \"Rent\"\ncolour = \"red\"\n";
    assert!(matches!(parse_config(content), Err(Error::Toml(_))));
}

#[test]
fn test_parse_rejects_empty_category_list() {
    let err = parse_config("default_income = 100\n").unwrap_err();
    assert!(err.to_string().contains("at least one"));
}

#[test]
fn test_parse_rejects_duplicate_names() {
    let content = "[[category]]\nname = \"Rent\"\n[[category]]\nname = \"rent\"\n";
    let err = parse_config(content).unwrap_err();
    assert!(err.to_string().contains("duplicate category"));
}

#[test]
fn test_parse_rejects_savings_as_need() {
    let content = "[[category]]\nname = \"Savings\"\ngroup = \"need\"\n";
    let err = parse_config(content).unwrap_err();
    assert!(err.to_string().contains("designated savings"));
}

#[test]
fn test_parse_rejects_lowercase_savings_as_need() {
    let content = "[[category]]\nname = \"savings\"\ngroup = \"need\"\n";
    let err = parse_config(content).unwrap_err();
    assert!(err.to_string().contains("designated savings"));
}

#[test]
fn test_parse_canonicalises_savings_spelling() {
    let content = "[[category]]\nname = \"SAVINGS\"\nbenchmark = 0.2\n";
    let config = parse_config(content).unwrap();
    assert_eq!(config.category_names(), vec![SAVINGS_CATEGORY]);
    assert_eq!(
        config.find_category("savings").unwrap().name,
        SAVINGS_CATEGORY
    );
}

#[test]
fn test_parse_rejects_unknown_group() {
    let content = "[[category]]\nname = \"Rent\"\ngroup = \"luxury\"\n";
    let err = parse_config(content).unwrap_err();
    assert!(err.to_string().contains("unknown group 'luxury'"));
}

#[test]
fn test_parse_rejects_negative_benchmark() {
    let content = "[[category]]\nname = \"Rent\"\nbenchmark = -0.1\n";
    assert!(parse_config(content).is_err());
}

#[test]
fn test_parse_rejects_negative_income() {
    let content = "default_income = -5\n[[category]]\nname = \"Rent\"\n";
    assert!(parse_config(content).is_err());
}

// ── Resolution ────────────────────────────────────────────────

#[test]
fn test_load_from_override_file() {
    let file = make_config_file(MINIMAL);
    let (config, source) = load_from(Some(file.path())).unwrap();
    assert_eq!(config.default_income, dec!(3000));
    assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
}

#[test]
fn test_load_from_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let (config, source) = load_from(Some(&missing)).unwrap();
    assert_eq!(source, ConfigSource::Embedded);
    assert_eq!(config, BudgetConfig::embedded().unwrap());
}

#[test]
fn test_load_from_none_uses_embedded() {
    let (_, source) = load_from(None).unwrap();
    assert_eq!(source, ConfigSource::Embedded);
}

#[test]
fn test_load_from_invalid_override_is_error() {
    let file = make_config_file("[[category]]\nname = \"Savings\"\ngroup = \"want\"\n");
    assert!(load_from(Some(file.path())).is_err());
}

#[test]
fn test_config_source_display() {
    assert_eq!(ConfigSource::Embedded.to_string(), "built-in defaults");
}
