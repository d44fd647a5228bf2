pub mod comparator;
pub mod hours;
pub mod models;

pub use comparator::{estimate, list_gpu_models, quote, quote_for_tier, quote_request};
pub use hours::Hours;
pub use models::{ProviderQuote, QuoteRequest, Tier};
