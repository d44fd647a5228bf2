use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use gpu_pricing::config::Config;
use gpu_pricing::pricing::{estimate, list_gpu_models, quote_for_tier, Hours, ProviderQuote, Tier};
use gpu_pricing::share::ShareParams;
use gpu_pricing::ProviderCatalog;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use super::{money, optional_money, print_disclaimer};

#[derive(Debug, Serialize)]
struct QuoteReport<'a> {
    gpu: &'a str,
    hours: Hours,
    tier: Tier,
    catalog_last_updated: Option<NaiveDate>,
    share_url: Option<String>,
    quotes: Vec<QuoteRow<'a>>,
}

#[derive(Debug, Serialize)]
struct QuoteRow<'a> {
    rank: usize,
    #[serde(flatten)]
    quote: &'a ProviderQuote,
    effective_total: Decimal,
    savings_amount: Option<Decimal>,
    savings_percent: Option<i64>,
}

/// Execute the quote command
///
/// Missing flags fall back to the configured defaults; without a configured
/// GPU the first model in the catalog is used.
pub fn execute(
    cfg: &Config,
    catalog: &ProviderCatalog,
    gpu: Option<String>,
    hours: Option<String>,
    tier: Option<Tier>,
    json: bool,
) -> Result<()> {
    let gpu = resolve_gpu(cfg, catalog, gpu)?;
    let raw_hours = hours.unwrap_or_else(|| cfg.defaults.hours.clone());
    let tier = tier.unwrap_or(cfg.defaults.tier);
    let parsed_hours = Hours::parse(&raw_hours);

    info!("Quoting {} for {} hours ({})", gpu, parsed_hours, tier);
    let quotes = quote_for_tier(catalog, &gpu, parsed_hours, tier);

    let note = hours_note(&raw_hours, parsed_hours);

    let share_url = match ShareParams::new(Some(gpu.clone()), Some(raw_hours))
        .to_url(&cfg.share.base_url)
    {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            warn!("Could not build share link: {}", e);
            None
        }
    };

    if json {
        let report = QuoteReport {
            gpu: &gpu,
            hours: parsed_hours,
            tier,
            catalog_last_updated: catalog.last_updated(),
            share_url,
            quotes: build_rows(&quotes),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("GPU Cost Comparison");
    println!("===================\n");
    println!("  {}   {}", "GPU:".cyan(), gpu);
    println!("  {} {}", "Hours:".cyan(), parsed_hours);
    println!("  {}  {}", "Tier:".cyan(), tier);
    if let Some(note) = note {
        println!("  {}", note.yellow());
    }
    println!();

    if quotes.is_empty() {
        print_no_results(catalog, &gpu, tier);
    } else {
        println!("{}", build_quote_table(&quotes, tier));
        println!();
        print_cheapest(&quotes[0], tier);
        if let Some(line) = estimate_line(&quotes[0], tier, parsed_hours) {
            println!("  {}", line.dimmed());
        }
    }

    if let Some(url) = share_url {
        println!("  {} {}", "Share:".cyan(), url);
    }
    if let Some(updated) = catalog.last_updated() {
        println!("  {} {}", "Prices last updated".dimmed(), updated.to_string().dimmed());
    }
    println!();
    print_disclaimer();

    Ok(())
}

fn resolve_gpu(cfg: &Config, catalog: &ProviderCatalog, gpu: Option<String>) -> Result<String> {
    gpu.or_else(|| cfg.defaults.gpu.clone())
        .or_else(|| list_gpu_models(catalog).into_iter().next())
        .ok_or_else(|| anyhow!("The pricing catalog does not contain any GPU models"))
}

fn build_rows(quotes: &[ProviderQuote]) -> Vec<QuoteRow<'_>> {
    quotes
        .iter()
        .enumerate()
        .map(|(idx, quote)| QuoteRow {
            rank: idx + 1,
            quote,
            effective_total: quote.effective_total(),
            savings_amount: quote.savings_amount(),
            savings_percent: quote.savings_percent(),
        })
        .collect()
}

/// Render ranked quotes; the cheapest row is highlighted
pub fn build_quote_table(quotes: &[ProviderQuote], tier: Tier) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("PROVIDER").fg(Color::Cyan),
        Cell::new("TYPE").fg(Color::Cyan),
        Cell::new("ON-DEMAND /HR").fg(Color::Cyan),
        Cell::new("SPOT /HR").fg(Color::Cyan),
        Cell::new("ON-DEMAND TOTAL").fg(Color::Cyan),
        Cell::new("SPOT TOTAL").fg(Color::Cyan),
        Cell::new("SAVINGS").fg(Color::Cyan),
        Cell::new(format!("{} TOTAL", tier.as_str().to_uppercase())).fg(Color::Cyan),
    ]);

    for (idx, quote) in quotes.iter().enumerate() {
        let savings = match (quote.savings_amount(), quote.savings_percent()) {
            (Some(amount), Some(percent)) => format!("{} ({}%)", money(amount), percent),
            _ => "-".to_string(),
        };
        let ranked_total = quote.tier_total(tier).map(money).unwrap_or_default();

        let cells = vec![
            Cell::new(idx + 1),
            Cell::new(&quote.provider_name),
            Cell::new(quote.provider_type),
            Cell::new(money(quote.on_demand_rate)),
            Cell::new(optional_money(quote.spot_rate)),
            Cell::new(money(quote.on_demand_total)),
            Cell::new(optional_money(quote.spot_total)),
            Cell::new(savings),
            Cell::new(ranked_total),
        ];

        if idx == 0 {
            table.add_row(cells.into_iter().map(|c| c.fg(Color::Green)));
        } else {
            table.add_row(cells);
        }
    }

    table
}

fn print_cheapest(best: &ProviderQuote, tier: Tier) {
    let total = best.tier_total(tier).unwrap_or_else(|| best.effective_total());
    let uses_spot = match tier {
        Tier::OnDemand => false,
        Tier::Best | Tier::Spot => best.spot_total.is_some(),
    };

    let mut line = format!(
        "  {} {} at {}",
        "Cheapest:".green().bold(),
        best.provider_name.bold(),
        money(total)
    );
    if uses_spot {
        if let (Some(amount), Some(percent)) = (best.savings_amount(), best.savings_percent()) {
            line.push_str(&format!(" (spot, saves {} / {}%)", money(amount), percent));
        }
    }
    println!("{}", line);
}

/// Explain an hours value that was not taken at face value
fn hours_note(raw: &str, parsed: Hours) -> Option<String> {
    if parsed == Hours::MAX {
        Some(format!("Hours capped at {}", Hours::MAX))
    } else if parsed.is_zero() && !starts_unsigned(raw) {
        Some(format!("'{}' is not a positive number of hours, showing zero cost", raw.trim()))
    } else {
        None
    }
}

// "0" and "0h" are a deliberate zero; "-5" and "abc" are not
fn starts_unsigned(raw: &str) -> bool {
    raw.trim_start().starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// `hours x rate = total` for the cheapest row, using the rate the tier ranks by
fn estimate_line(best: &ProviderQuote, tier: Tier, hours: Hours) -> Option<String> {
    let rate = match tier {
        Tier::Best => best.spot_rate.unwrap_or(best.on_demand_rate),
        Tier::OnDemand => best.on_demand_rate,
        Tier::Spot => best.spot_rate?,
    };
    let total = estimate(rate, hours);
    Some(format!("{} h × {}/hr = {}", hours, money(rate), money(total)))
}

fn print_no_results(catalog: &ProviderCatalog, gpu: &str, tier: Tier) {
    let known = list_gpu_models(catalog);
    if known.contains(gpu) && tier == Tier::Spot {
        println!("{}", format!("  No provider offers a spot tier for {}.", gpu).yellow());
    } else {
        println!("{}", format!("  No providers offer {}.", gpu).yellow());
        if !known.is_empty() {
            let models: Vec<&str> = known.iter().map(String::as_str).collect();
            println!("  Available models: {}", models.join(", "));
        }
    }
    println!();
}
