use crate::catalog::models::ProviderEntry;
use crate::catalog::ProviderCatalog;
use crate::config::CatalogConfig;
use crate::error::AppError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Catalog shipped inside the binary
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// On-disk catalog document
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,
}

/// Parse a catalog document and check its structure
///
/// Rate sanity (negative rates, spot above on-demand) is not checked here;
/// see [`ProviderCatalog::validate`].
pub fn parse_catalog_toml(content: &str) -> Result<ProviderCatalog, AppError> {
    let file: CatalogFile = toml::from_str(content)?;

    let mut seen = HashSet::new();
    for provider in &file.providers {
        if provider.name.trim().is_empty() {
            return Err(AppError::CatalogError(
                "provider name cannot be empty".to_string(),
            ));
        }
        if !seen.insert(provider.name.as_str()) {
            return Err(AppError::CatalogError(format!(
                "duplicate provider '{}'",
                provider.name
            )));
        }
        if provider.gpus.is_empty() {
            return Err(AppError::CatalogError(format!(
                "provider '{}' offers no GPUs",
                provider.name
            )));
        }
        if provider.gpus.keys().any(|model| model.trim().is_empty()) {
            return Err(AppError::CatalogError(format!(
                "provider '{}' has a GPU with an empty model name",
                provider.name
            )));
        }
    }

    debug!("Parsed {} providers from catalog document", file.providers.len());
    Ok(ProviderCatalog::new(file.providers, file.last_updated))
}

/// Read and parse a catalog file from disk
pub fn load_catalog_file(path: &Path) -> Result<ProviderCatalog, AppError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::CatalogError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_catalog_toml(&content)
}

/// Load the catalog selected by configuration, warning when it looks stale
pub fn load_catalog(cfg: &CatalogConfig, today: NaiveDate) -> Result<ProviderCatalog, AppError> {
    let catalog = match &cfg.path {
        Some(path) => {
            info!("Loading catalog from {}", path);
            load_catalog_file(Path::new(path))?
        }
        None => ProviderCatalog::builtin()?,
    };

    info!(
        "Loaded {} providers offering {} GPU models",
        catalog.len(),
        catalog.gpu_model_count()
    );

    if catalog.is_stale(today, cfg.stale_after_days) {
        match (catalog.age_in_days(today), catalog.last_updated()) {
            (Some(age), Some(updated)) => warn!(
                "Pricing catalog is {} days old (last updated {}); rates may be out of date",
                age, updated
            ),
            _ => warn!("Pricing catalog has no last_updated date"),
        }
    }

    Ok(catalog)
}
