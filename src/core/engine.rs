use crate::core::pricing;
use crate::domain::model::{
    DiscountRule, PriceTier, QuoteRequest, QuoteResult, RatingBounds, ValidationErrors,
};
use crate::domain::ports::PricingProvider;
use rust_decimal::Decimal;

/// 持有注入的價目表並提供報價運算。建立後不可變，可安全跨執行緒共享。
#[derive(Debug, Clone)]
pub struct PricingEngine {
    bounds: RatingBounds,
    tiers: Vec<PriceTier>,
    discount_rules: Vec<DiscountRule>,
}

impl PricingEngine {
    pub fn new(bounds: RatingBounds, tiers: Vec<PriceTier>, discount_rules: Vec<DiscountRule>) -> Self {
        Self {
            bounds,
            tiers,
            discount_rules,
        }
    }

    pub fn from_provider<P: PricingProvider + ?Sized>(provider: &P) -> Self {
        tracing::debug!(
            "Building pricing engine with {} tiers and {} discount rules",
            provider.tiers().len(),
            provider.discount_rules().len()
        );

        Self::new(
            provider.bounds(),
            provider.tiers().to_vec(),
            provider.discount_rules().to_vec(),
        )
    }

    pub fn bounds(&self) -> &RatingBounds {
        &self.bounds
    }

    pub fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }

    pub fn discount_rules(&self) -> &[DiscountRule] {
        &self.discount_rules
    }

    pub fn validate_request(&self, request: &QuoteRequest) -> std::result::Result<(), ValidationErrors> {
        pricing::validate_request(request, &self.bounds)
    }

    pub fn base_price(&self, current_rating: i64, desired_rating: i64) -> Decimal {
        pricing::compute_base_price(current_rating, desired_rating, &self.tiers)
    }

    pub fn discount_percent(&self, current_rating: i64, rating_gain: i64) -> Decimal {
        pricing::compute_discount_percent(
            current_rating,
            rating_gain,
            &self.bounds,
            &self.discount_rules,
        )
    }

    pub fn quote(&self, request: &QuoteRequest) -> std::result::Result<QuoteResult, ValidationErrors> {
        pricing::compute_quote(request, &self.bounds, &self.tiers, &self.discount_rules)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::from_provider(&crate::config::pricing_config::PricingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RatingField;
    use rust_decimal_macros::dec;

    #[test]
    fn test_engine_uses_injected_tables() {
        let engine = PricingEngine::new(
            RatingBounds {
                min_rating: 0,
                max_rating: 100,
                min_rating_for_discount_eligibility: 10,
            },
            vec![PriceTier::new(0, 100, dec!(2.00))],
            vec![DiscountRule::new(50, dec!(25))],
        );

        let quote = engine.quote(&QuoteRequest::new(10, 70)).unwrap();

        assert_eq!(quote.base_price, dec!(120.00));
        assert_eq!(quote.discount_percent, dec!(25));
        assert_eq!(quote.final_price, dec!(90.00));
    }

    #[test]
    fn test_engine_rejects_out_of_bounds() {
        let engine = PricingEngine::default();

        let errors = engine.quote(&QuoteRequest::new(100, 9000)).unwrap_err();

        assert!(errors.has_field(RatingField::DesiredRating));
        assert!(!errors.has_field(RatingField::Ordering));
    }

    #[test]
    fn test_engine_quote_is_idempotent() {
        let engine = PricingEngine::default();
        let request = QuoteRequest::new(4321, 7654);

        let first = engine.quote(&request).unwrap();
        let second = engine.quote(&request).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.final_price.serialize(), second.final_price.serialize());
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PricingEngine>();
    }
}
