use crate::catalog::ProviderType;
use crate::error::AppError;
use crate::pricing::hours::Hours;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Which price a ranking is based on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Spot when the provider has it, otherwise on-demand
    #[default]
    Best,
    OnDemand,
    /// Only providers with a spot tier
    Spot,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Best => "best",
            Tier::OnDemand => "on-demand",
            Tier::Spot => "spot",
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "best" => Ok(Tier::Best),
            "on-demand" | "ondemand" => Ok(Tier::OnDemand),
            "spot" => Ok(Tier::Spot),
            _ => Err(AppError::InvalidInput(format!("Invalid pricing tier: {}", s))),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single comparison request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRequest {
    pub gpu_model: String,
    pub hours: Hours,
}

impl QuoteRequest {
    pub fn new(gpu_model: impl Into<String>, hours: impl Into<Hours>) -> Self {
        Self {
            gpu_model: gpu_model.into(),
            hours: hours.into(),
        }
    }
}

/// Cost of renting one GPU model from one provider for the requested hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderQuote {
    pub provider_name: String,
    pub provider_type: ProviderType,
    pub on_demand_rate: Decimal,
    pub spot_rate: Option<Decimal>,
    pub on_demand_total: Decimal,
    pub spot_total: Option<Decimal>,
}

impl ProviderQuote {
    /// Spot total when available, otherwise on-demand total
    pub fn effective_total(&self) -> Decimal {
        self.spot_total.unwrap_or(self.on_demand_total)
    }

    /// Total used for ranking under `tier`; `None` for `Spot` without a spot rate
    pub fn tier_total(&self, tier: Tier) -> Option<Decimal> {
        match tier {
            Tier::Best => Some(self.effective_total()),
            Tier::OnDemand => Some(self.on_demand_total),
            Tier::Spot => self.spot_total,
        }
    }

    pub fn savings_amount(&self) -> Option<Decimal> {
        self.spot_total.map(|spot| self.on_demand_total.saturating_sub(spot))
    }

    /// Whole-number percentage saved by choosing spot, rounded half away from zero
    ///
    /// `None` without a spot rate, or when the ratio does not fit a `Decimal`.
    pub fn savings_percent(&self) -> Option<i64> {
        let spot = self.spot_rate?;
        if self.on_demand_rate.is_zero() {
            return Some(0);
        }

        let ratio = spot.checked_div(self.on_demand_rate)?;
        Decimal::ONE
            .checked_sub(ratio)?
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tensordock_quote() -> ProviderQuote {
        ProviderQuote {
            provider_name: "TensorDock".to_string(),
            provider_type: ProviderType::Marketplace,
            on_demand_rate: dec!(2.25),
            spot_rate: Some(dec!(1.91)),
            on_demand_total: dec!(22.50),
            spot_total: Some(dec!(19.10)),
        }
    }

    fn akash_quote() -> ProviderQuote {
        ProviderQuote {
            provider_name: "Akash Network".to_string(),
            provider_type: ProviderType::Decentralized,
            on_demand_rate: dec!(1.48),
            spot_rate: None,
            on_demand_total: dec!(14.80),
            spot_total: None,
        }
    }

    #[test]
    fn test_effective_total() {
        assert_eq!(tensordock_quote().effective_total(), dec!(19.10));
        assert_eq!(akash_quote().effective_total(), dec!(14.80));
    }

    #[test]
    fn test_tier_total() {
        let quote = tensordock_quote();
        assert_eq!(quote.tier_total(Tier::Best), Some(dec!(19.10)));
        assert_eq!(quote.tier_total(Tier::OnDemand), Some(dec!(22.50)));
        assert_eq!(quote.tier_total(Tier::Spot), Some(dec!(19.10)));
        assert_eq!(akash_quote().tier_total(Tier::Spot), None);
    }

    #[test]
    fn test_savings() {
        let quote = tensordock_quote();
        assert_eq!(quote.savings_amount(), Some(dec!(3.40)));
        // 1 - 1.91 / 2.25 = 0.1511...
        assert_eq!(quote.savings_percent(), Some(15));

        assert_eq!(akash_quote().savings_amount(), None);
        assert_eq!(akash_quote().savings_percent(), None);
    }

    #[test]
    fn test_savings_percent_rounds_half_up() {
        let mut quote = tensordock_quote();
        quote.on_demand_rate = dec!(2.00);
        quote.spot_rate = Some(dec!(1.89));
        // exactly 5.5%
        assert_eq!(quote.savings_percent(), Some(6));
    }

    #[test]
    fn test_savings_percent_zero_on_demand_rate() {
        let mut quote = tensordock_quote();
        quote.on_demand_rate = Decimal::ZERO;
        quote.spot_rate = Some(Decimal::ZERO);
        assert_eq!(quote.savings_percent(), Some(0));
    }

    #[test]
    fn test_savings_with_extreme_rates_do_not_panic() {
        let mut quote = tensordock_quote();
        quote.on_demand_rate = dec!(0.0000000000000000000000000001);
        quote.spot_rate = Some(Decimal::MAX);
        assert_eq!(quote.savings_percent(), None);

        quote.on_demand_total = Decimal::MAX;
        quote.spot_total = Some(dec!(-1));
        assert_eq!(quote.savings_amount(), Some(Decimal::MAX));
    }

    #[test]
    fn test_tier_from_str() {
        assert_eq!("best".parse::<Tier>().unwrap(), Tier::Best);
        assert_eq!("on-demand".parse::<Tier>().unwrap(), Tier::OnDemand);
        assert_eq!("ON_DEMAND".parse::<Tier>().unwrap(), Tier::OnDemand);
        assert_eq!("Spot".parse::<Tier>().unwrap(), Tier::Spot);
        assert!("reserved".parse::<Tier>().is_err());
    }

    #[test]
    fn test_quote_request_normalizes_hours() {
        let request = QuoteRequest::new("A100 80GB", "-5");
        assert_eq!(request.hours, Hours::ZERO);
    }
}
