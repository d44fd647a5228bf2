use crate::catalog::{ProviderCatalog, ProviderEntry, RatePair};
use crate::pricing::hours::Hours;
use crate::pricing::models::{ProviderQuote, QuoteRequest, Tier};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeSet;
use tracing::debug;

/// Every GPU model offered by at least one provider, sorted and deduplicated
pub fn list_gpu_models(catalog: &ProviderCatalog) -> BTreeSet<String> {
    catalog
        .iter()
        .flat_map(|provider| provider.gpus.keys().cloned())
        .collect()
}

/// Rank the providers offering `gpu_model`, cheapest effective cost first
///
/// Providers that do not offer the model are left out. Equal costs keep
/// catalog order. Invalid or negative hours count as zero.
pub fn quote(
    catalog: &ProviderCatalog,
    gpu_model: &str,
    hours: impl Into<Hours>,
) -> Vec<ProviderQuote> {
    quote_for_tier(catalog, gpu_model, hours, Tier::Best)
}

/// Like [`quote`], ranked by the total for `tier`
///
/// `Tier::Spot` additionally drops providers without a spot rate.
pub fn quote_for_tier(
    catalog: &ProviderCatalog,
    gpu_model: &str,
    hours: impl Into<Hours>,
    tier: Tier,
) -> Vec<ProviderQuote> {
    let hours = hours.into();

    let mut quotes: Vec<ProviderQuote> = catalog
        .iter()
        .filter_map(|provider| {
            provider
                .rates_for(gpu_model)
                .map(|rates| price_provider(provider, rates, hours))
        })
        .filter(|quote| quote.tier_total(tier).is_some())
        .collect();

    // sort_by is stable, so ties stay in catalog order
    quotes.sort_by(|a, b| a.tier_total(tier).cmp(&b.tier_total(tier)));

    debug!(
        "Quoted {} providers for {} x {}h ({})",
        quotes.len(),
        gpu_model,
        hours,
        tier
    );
    quotes
}

/// Run a [`QuoteRequest`] against the catalog
pub fn quote_request(
    catalog: &ProviderCatalog,
    request: &QuoteRequest,
    tier: Tier,
) -> Vec<ProviderQuote> {
    quote_for_tier(catalog, &request.gpu_model, request.hours, tier)
}

/// Single-rate estimate rounded to cents
pub fn estimate(rate: Decimal, hours: impl Into<Hours>) -> Decimal {
    rate.saturating_mul(hours.into().value())
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn price_provider(provider: &ProviderEntry, rates: &RatePair, hours: Hours) -> ProviderQuote {
    // Hours are capped, but a custom catalog can still carry an absurd rate
    let hours = hours.value();
    ProviderQuote {
        provider_name: provider.name.clone(),
        provider_type: provider.provider_type,
        on_demand_rate: rates.on_demand,
        spot_rate: rates.spot,
        on_demand_total: rates.on_demand.saturating_mul(hours),
        spot_total: rates.spot.map(|spot| spot.saturating_mul(hours)),
    }
}
