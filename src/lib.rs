pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::message::OrderMessage;
pub use adapters::presentation::QuoteView;
pub use app::batch::{BatchQuoter, BatchSummary};
pub use config::pricing_config::PricingConfig;
pub use core::engine::PricingEngine;
pub use domain::model::{
    DiscountRule, OrderDetails, PriceTier, QuoteRequest, QuoteResult, RatingBounds, RatingField,
    ValidationError, ValidationErrors,
};
pub use utils::error::{QuoteError, Result};
