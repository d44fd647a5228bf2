use crate::catalog::ProviderCatalog;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A data-quality problem found in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    NegativeOnDemandRate {
        provider: String,
        gpu: String,
        rate: Decimal,
    },
    NegativeSpotRate {
        provider: String,
        gpu: String,
        rate: Decimal,
    },
    /// Spot is a discount; a spot rate above on-demand is a data-entry error
    SpotAboveOnDemand {
        provider: String,
        gpu: String,
        on_demand: Decimal,
        spot: Decimal,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeOnDemandRate { provider, gpu, rate } => {
                write!(f, "{} / {}: negative on-demand rate {}", provider, gpu, rate)
            }
            Self::NegativeSpotRate { provider, gpu, rate } => {
                write!(f, "{} / {}: negative spot rate {}", provider, gpu, rate)
            }
            Self::SpotAboveOnDemand {
                provider,
                gpu,
                on_demand,
                spot,
            } => write!(
                f,
                "{} / {}: spot rate {} exceeds on-demand rate {}",
                provider, gpu, spot, on_demand
            ),
        }
    }
}

/// Check every rate in the catalog, returning all problems found
pub fn validate_catalog(catalog: &ProviderCatalog) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    for provider in catalog.iter() {
        for (gpu, rates) in &provider.gpus {
            if rates.on_demand < Decimal::ZERO {
                issues.push(CatalogIssue::NegativeOnDemandRate {
                    provider: provider.name.clone(),
                    gpu: gpu.clone(),
                    rate: rates.on_demand,
                });
            }

            let Some(spot) = rates.spot else {
                continue;
            };

            if spot < Decimal::ZERO {
                issues.push(CatalogIssue::NegativeSpotRate {
                    provider: provider.name.clone(),
                    gpu: gpu.clone(),
                    rate: spot,
                });
            }
            if spot > rates.on_demand {
                issues.push(CatalogIssue::SpotAboveOnDemand {
                    provider: provider.name.clone(),
                    gpu: gpu.clone(),
                    on_demand: rates.on_demand,
                    spot,
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProviderEntry, ProviderType, RatePair};
    use rust_decimal_macros::dec;

    #[test]
    fn test_builtin_catalog_is_clean() {
        let catalog = ProviderCatalog::builtin().unwrap();
        let issues = validate_catalog(&catalog);
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_spot_premium_detected() {
        let catalog = ProviderCatalog::new(
            vec![ProviderEntry::new("Overpriced", ProviderType::Cloud)
                .gpu("A10", RatePair::with_spot(dec!(0.75), dec!(0.90)))],
            None,
        );

        let issues = validate_catalog(&catalog);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "Overpriced / A10: spot rate 0.90 exceeds on-demand rate 0.75"
        );
    }

    #[test]
    fn test_negative_rates_detected() {
        let catalog = ProviderCatalog::new(
            vec![ProviderEntry::new("Broken", ProviderType::Marketplace)
                .gpu("V100", RatePair::with_spot(dec!(-1), dec!(-2)))],
            None,
        );

        let issues = validate_catalog(&catalog);
        assert!(issues
            .iter()
            .any(|i| matches!(i, CatalogIssue::NegativeOnDemandRate { .. })));
        assert!(issues
            .iter()
            .any(|i| matches!(i, CatalogIssue::NegativeSpotRate { .. })));
    }
}
