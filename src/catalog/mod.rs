pub mod loader;
pub mod models;
pub mod validate;

pub use loader::{load_catalog, load_catalog_file, parse_catalog_toml, BUILTIN_CATALOG};
pub use models::{ProviderEntry, ProviderType, RatePair};
pub use validate::{validate_catalog, CatalogIssue};

use crate::error::AppError;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::Path;

/// Static table of providers and the GPUs they rent out
///
/// Provider order is the order of the source document and is preserved;
/// quoting relies on it to break ties between equally priced providers.
/// The catalog is never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    providers: Vec<ProviderEntry>,
    last_updated: Option<NaiveDate>,
}

impl ProviderCatalog {
    /// Build a catalog from already-checked entries
    pub fn new(providers: Vec<ProviderEntry>, last_updated: Option<NaiveDate>) -> Self {
        Self {
            providers,
            last_updated,
        }
    }

    /// The catalog embedded in the binary
    pub fn builtin() -> Result<Self, AppError> {
        parse_catalog_toml(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        parse_catalog_toml(content)
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        load_catalog_file(path)
    }

    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Providers in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ProviderEntry> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn last_updated(&self) -> Option<NaiveDate> {
        self.last_updated
    }

    /// Distinct GPU models across all providers
    pub fn gpu_model_count(&self) -> usize {
        self.providers
            .iter()
            .flat_map(|p| p.gpus.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Days elapsed since `last_updated`, if the catalog carries a date
    pub fn age_in_days(&self, today: NaiveDate) -> Option<i64> {
        self.last_updated
            .map(|updated| (today - updated).num_days())
    }

    pub fn is_stale(&self, today: NaiveDate, max_age_days: u32) -> bool {
        match self.age_in_days(today) {
            Some(age) => age > i64::from(max_age_days),
            None => true,
        }
    }

    pub fn validate(&self) -> Vec<CatalogIssue> {
        validate_catalog(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_preserves_document_order() {
        let catalog = ProviderCatalog::builtin().unwrap();
        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names.first(), Some(&"Akash Network"));
        assert_eq!(names.last(), Some(&"Jarvislabs"));
        let vast = names.iter().position(|n| *n == "Vast.ai").unwrap();
        let tensordock = names.iter().position(|n| *n == "TensorDock").unwrap();
        assert!(vast < tensordock);
    }

    #[test]
    fn test_age_and_staleness() {
        let catalog = ProviderCatalog::new(Vec::new(), Some(date(2026, 2, 10)));

        assert_eq!(catalog.age_in_days(date(2026, 2, 20)), Some(10));
        assert!(!catalog.is_stale(date(2026, 2, 20), 90));
        assert!(catalog.is_stale(date(2026, 6, 1), 90));
    }

    #[test]
    fn test_undated_catalog_is_stale() {
        let catalog = ProviderCatalog::default();
        assert_eq!(catalog.age_in_days(date(2026, 1, 1)), None);
        assert!(catalog.is_stale(date(2026, 1, 1), 90));
    }

    #[test]
    fn test_get_by_name() {
        let catalog = ProviderCatalog::builtin().unwrap();
        let tensordock = catalog.get("TensorDock").unwrap();
        assert_eq!(tensordock.provider_type, ProviderType::Marketplace);
        assert!(catalog.get("Nonexistent Cloud").is_none());
    }
}
