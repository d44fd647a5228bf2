use crate::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a provider sources its GPUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Permissionless networks of independent hosts (Akash, io.net, ...)
    Decentralized,
    /// Peer-to-peer rental marketplaces (Vast.ai, RunPod, ...)
    Marketplace,
    /// Conventional cloud providers
    Cloud,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Decentralized => "decentralized",
            ProviderType::Marketplace => "marketplace",
            ProviderType::Cloud => "cloud",
        }
    }
}

impl std::str::FromStr for ProviderType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "decentralized" => Ok(ProviderType::Decentralized),
            "marketplace" => Ok(ProviderType::Marketplace),
            "cloud" => Ok(ProviderType::Cloud),
            _ => Err(AppError::InvalidInput(format!("Invalid provider type: {}", s))),
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hourly rates for one GPU model at one provider, in USD per GPU-hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePair {
    pub on_demand: Decimal,
    /// Absent when the provider has no spot tier for this GPU
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<Decimal>,
}

impl RatePair {
    pub fn on_demand(rate: Decimal) -> Self {
        Self {
            on_demand: rate,
            spot: None,
        }
    }

    pub fn with_spot(on_demand: Decimal, spot: Decimal) -> Self {
        Self {
            on_demand,
            spot: Some(spot),
        }
    }
}

/// A single provider and the GPUs it offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    #[serde(default)]
    pub gpus: BTreeMap<String, RatePair>,
}

impl ProviderEntry {
    pub fn new(name: impl Into<String>, provider_type: ProviderType) -> Self {
        Self {
            name: name.into(),
            provider_type,
            gpus: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly used to assemble catalogs in tests
    pub fn gpu(mut self, model: impl Into<String>, rates: RatePair) -> Self {
        self.gpus.insert(model.into(), rates);
        self
    }

    pub fn rates_for(&self, gpu_model: &str) -> Option<&RatePair> {
        self.gpus.get(gpu_model)
    }

    pub fn spot_count(&self) -> usize {
        self.gpus.values().filter(|r| r.spot.is_some()).count()
    }
}
