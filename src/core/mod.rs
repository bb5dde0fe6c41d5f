pub mod engine;
pub mod pricing;

pub use crate::domain::model::{QuoteRequest, QuoteResult};
pub use crate::domain::ports::PricingProvider;
pub use crate::utils::error::Result;
