//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - quote: Rank providers for a GPU and duration
//! - gpus: List GPU models
//! - providers: List catalog providers
//! - validate: Check catalog data quality
//! - share: Build or decode shareable links
//! - config: Configuration display

pub mod config;
pub mod gpus;
pub mod providers;
pub mod quote;
pub mod share;
pub mod validate;

use colored::Colorize;
use gpu_pricing::error::{error_body, AppError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Format a USD amount with two decimals
pub fn money(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", cents)
}

/// Format an optional USD amount, `-` when absent
pub fn optional_money(amount: Option<Decimal>) -> String {
    amount.map(money).unwrap_or_else(|| "-".to_string())
}

/// Reference-only disclaimer printed under price listings
pub fn print_disclaimer() {
    println!(
        "{}",
        "Pricing estimates are for reference only. Actual costs may vary.".dimmed()
    );
}

/// JSON error body for a failed `--json` command
///
/// Errors that did not originate as an [`AppError`] are reported as
/// `internal_error`.
pub fn json_error(err: &anyhow::Error) -> Value {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => app_err.to_json(),
        None => error_body(&format!("{:#}", err), "internal_error"),
    }
}
