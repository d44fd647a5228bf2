/// Integration tests for loading catalogs from disk and configuration
use chrono::NaiveDate;
use gpu_pricing::{
    catalog::{load_catalog, CatalogIssue, ProviderCatalog},
    config::CatalogConfig,
    pricing::quote,
};
use rust_decimal_macros::dec;
use std::io::Write;

const CUSTOM_CATALOG: &str = r#"
last_updated = "2025-01-15"

[[providers]]
name = "Local Lab"
type = "cloud"

[providers.gpus."A10"]
on_demand = 0.60
spot = 0.45

[[providers]]
name = "Garage Rigs"
type = "marketplace"

[providers.gpus."A10"]
on_demand = 0.55
"#;

fn write_catalog(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_custom_catalog_from_config() {
    let file = write_catalog(CUSTOM_CATALOG);
    let cfg = CatalogConfig {
        path: Some(file.path().to_string_lossy().to_string()),
        stale_after_days: 90,
    };
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    // Stale catalogs still load; staleness is only logged
    let catalog = load_catalog(&cfg, today).unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.is_stale(today, cfg.stale_after_days));

    let quotes = quote(&catalog, "A10", "10");
    let names: Vec<&str> = quotes.iter().map(|q| q.provider_name.as_str()).collect();
    assert_eq!(names, vec!["Local Lab", "Garage Rigs"]);
    assert_eq!(quotes[0].spot_total, Some(dec!(4.50)));
}

#[test]
fn test_from_path_reports_parse_errors() {
    let file = write_catalog("[[providers]]\nname = 42\n");
    let result = ProviderCatalog::from_path(file.path());
    assert!(result.unwrap_err().to_string().starts_with("Catalog error"));
}

#[test]
fn test_validate_flags_spot_premium_from_file() {
    let file = write_catalog(
        r#"
        [[providers]]
        name = "Upside Down"
        type = "cloud"

        [providers.gpus."V100"]
        on_demand = 0.40
        spot = 0.55
        "#,
    );

    let catalog = ProviderCatalog::from_path(file.path()).unwrap();
    let issues = catalog.validate();

    assert_eq!(issues.len(), 1);
    assert!(matches!(issues[0], CatalogIssue::SpotAboveOnDemand { .. }));
}

#[test]
fn test_builtin_catalog_is_valid_and_dated() {
    let catalog = ProviderCatalog::builtin().unwrap();
    assert!(catalog.validate().is_empty());
    assert_eq!(
        catalog.last_updated(),
        Some(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap())
    );
    assert!(catalog.len() >= 10);
}
