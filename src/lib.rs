pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod share;

pub use catalog::{ProviderCatalog, ProviderEntry, ProviderType, RatePair};
pub use error::AppError;
pub use pricing::{list_gpu_models, quote, quote_for_tier, Hours, ProviderQuote, QuoteRequest, Tier};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over `default_level`. Logs go to stderr so
/// that `--json` output on stdout stays machine-readable.
///
/// Note: This function can only be called once.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
