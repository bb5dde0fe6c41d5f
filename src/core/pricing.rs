use crate::domain::model::{
    DiscountRule, PriceTier, QuoteRequest, QuoteResult, RatingBounds, RatingField,
    ValidationError, ValidationErrors,
};
use rust_decimal::Decimal;

/// 檢查報價請求。所有違規欄位都會被回報，不會在第一個錯誤就停止。
pub fn validate_request(
    request: &QuoteRequest,
    bounds: &RatingBounds,
) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let in_range = |rating: i64| rating >= bounds.min_rating && rating <= bounds.max_rating;
    let range_reason = || {
        format!(
            "rating must be between {} and {}",
            bounds.min_rating, bounds.max_rating
        )
    };

    if !in_range(request.current_rating) {
        errors.push(ValidationError::new(
            RatingField::CurrentRating,
            range_reason(),
        ));
    }

    if !in_range(request.desired_rating) {
        errors.push(ValidationError::new(
            RatingField::DesiredRating,
            range_reason(),
        ));
    }

    if request.desired_rating <= request.current_rating {
        errors.push(ValidationError::new(
            RatingField::Ordering,
            "desired rating must be higher than the current rating",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// 對分段單價在 `[current, desired)` 上積分。
///
/// Tiers are labelled with inclusive integer ranges where `max + 1 == next.min`,
/// so on the continuous axis a tier covers `(previous.max, max]` and the first
/// tier covers `[min, max]`. A single step `r -> r + 1` is priced by the tier
/// holding `r + 1`. Anything above the last tier is not priced.
pub fn compute_base_price(current_rating: i64, desired_rating: i64, tiers: &[PriceTier]) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut cursor = current_rating;
    let mut previous_max: Option<i64> = None;

    for tier in tiers {
        if cursor >= desired_rating {
            break;
        }

        let span_start = previous_max.unwrap_or(tier.min);
        previous_max = Some(tier.max);

        let start = cursor.max(span_start);
        let end = desired_rating.min(tier.max);
        if end > start {
            let cost = span_length(start, end).saturating_mul(tier.unit_price);
            total = total.saturating_add(cost);
            cursor = end;
        }
    }

    total
}

/// `end - start` 在 i128 中計算，極端的 i64 區間也不會溢位
fn span_length(start: i64, end: i64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(end) - i128::from(start), 0)
}

/// 整張價目表從第一個 tier 的 `min` 到最後一個 `max` 的總價。
/// 超出 `Decimal` 範圍時回傳 `None`，設定驗證用它拒絕無法計價的表格。
pub fn checked_table_price(tiers: &[PriceTier]) -> Option<Decimal> {
    let mut total = Decimal::ZERO;
    let mut previous_max: Option<i64> = None;

    for tier in tiers {
        let span_start = previous_max.unwrap_or(tier.min);
        previous_max = Some(tier.max);
        if tier.max > span_start {
            let cost = span_length(span_start, tier.max).checked_mul(tier.unit_price)?;
            total = total.checked_add(cost)?;
        }
    }

    Some(total)
}

/// 第一個 `min_gain_threshold <= gain` 的規則勝出，表格須由呼叫端依門檻遞減排序。
pub fn compute_discount_percent(
    current_rating: i64,
    rating_gain: i64,
    bounds: &RatingBounds,
    discount_rules: &[DiscountRule],
) -> Decimal {
    if current_rating < bounds.min_rating_for_discount_eligibility {
        return Decimal::ZERO;
    }

    discount_rules
        .iter()
        .find(|rule| rule.min_gain_threshold <= rating_gain)
        .map(|rule| rule.discount_percent)
        .unwrap_or(Decimal::ZERO)
}

pub fn compute_quote(
    request: &QuoteRequest,
    bounds: &RatingBounds,
    tiers: &[PriceTier],
    discount_rules: &[DiscountRule],
) -> std::result::Result<QuoteResult, ValidationErrors> {
    validate_request(request, bounds)?;

    let rating_gain = request.rating_gain();
    let base_price = compute_base_price(request.current_rating, request.desired_rating, tiers);
    let discount_percent =
        compute_discount_percent(request.current_rating, rating_gain, bounds, discount_rules);
    let final_price =
        base_price.saturating_mul(Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED);

    tracing::debug!(
        "Quoted {} -> {}: gain={}, base={}, discount={}%, final={}",
        request.current_rating,
        request.desired_rating,
        rating_gain,
        base_price,
        discount_percent,
        final_price
    );

    Ok(QuoteResult {
        rating_gain,
        base_price,
        final_price,
        discount_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::pricing_config::PricingConfig;
    use rust_decimal_macros::dec;

    fn tables() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn test_base_price_at_tier_boundaries() {
        let config = tables();

        assert_eq!(compute_base_price(4000, 4500, &config.tiers), dec!(500) * dec!(0.65));
        assert_eq!(compute_base_price(0, 4000, &config.tiers), dec!(4000) * dec!(0.40));
    }

    #[test]
    fn test_base_price_spanning_tiers() {
        let config = tables();

        // 5000 -> 5500 @ 1.10, 5500 -> 6000 @ 2.10
        assert_eq!(compute_base_price(5000, 6000, &config.tiers), dec!(1600.00));
        // 3900 -> 4000 @ 0.40, 4000 -> 4100 @ 0.65
        assert_eq!(compute_base_price(3900, 4100, &config.tiers), dec!(105.00));
    }

    #[test]
    fn test_base_price_truncates_above_last_tier() {
        let tiers = vec![
            PriceTier::new(0, 100, dec!(1.00)),
            PriceTier::new(101, 200, dec!(2.00)),
        ];

        assert_eq!(compute_base_price(150, 500, &tiers), dec!(100.00));
        assert_eq!(compute_base_price(300, 500, &tiers), Decimal::ZERO);
    }

    #[test]
    fn test_base_price_empty_or_below_first_tier() {
        let tiers = vec![PriceTier::new(100, 200, dec!(1.00))];

        assert_eq!(compute_base_price(50, 50, &tiers), Decimal::ZERO);
        assert_eq!(compute_base_price(10, 90, &tiers), Decimal::ZERO);
        assert_eq!(compute_base_price(10, 150, &tiers), dec!(50.00));
        assert_eq!(compute_base_price(120, 80, &tiers), Decimal::ZERO);
    }

    #[test]
    fn test_base_price_saturates_instead_of_panicking() {
        let tiers = vec![PriceTier::new(0, i64::MAX, dec!(100000000000))];

        assert_eq!(compute_base_price(0, i64::MAX, &tiers), Decimal::MAX);
        assert_eq!(checked_table_price(&tiers), None);
    }

    #[test]
    fn test_base_price_over_full_i64_span() {
        let tiers = vec![PriceTier::new(i64::MIN, i64::MAX, dec!(0.000001))];

        let price = compute_base_price(i64::MIN, i64::MAX, &tiers);
        assert_eq!(price, Decimal::from_i128_with_scale(u64::MAX as i128, 0) * dec!(0.000001));
    }

    #[test]
    fn test_checked_table_price_of_default_tables() {
        let config = tables();

        assert_eq!(
            checked_table_price(&config.tiers),
            Some(compute_base_price(0, 8500, &config.tiers))
        );
    }

    #[test]
    fn test_quote_with_extreme_bounds_does_not_overflow() {
        let bounds = RatingBounds {
            min_rating: -5_000_000_000_000_000_000,
            max_rating: 5_000_000_000_000_000_000,
            min_rating_for_discount_eligibility: 0,
        };
        let config = tables();
        let request = QuoteRequest::new(-5_000_000_000_000_000_000, 5_000_000_000_000_000_000);

        let quote = compute_quote(&request, &bounds, &config.tiers, &config.discounts).unwrap();

        assert_eq!(quote.rating_gain, i64::MAX);
        assert_eq!(quote.base_price, compute_base_price(0, 8500, &config.tiers));
    }

    #[test]
    fn test_discount_boundaries() {
        let config = tables();
        let bounds = config.bounds;

        assert_eq!(compute_discount_percent(4000, 1500, &bounds, &config.discounts), dec!(12));
        assert_eq!(compute_discount_percent(4000, 1499, &bounds, &config.discounts), dec!(10));
        assert_eq!(compute_discount_percent(3999, 5000, &bounds, &config.discounts), Decimal::ZERO);
        assert_eq!(compute_discount_percent(4000, 499, &bounds, &config.discounts), Decimal::ZERO);
        assert_eq!(compute_discount_percent(6000, 500, &bounds, &config.discounts), dec!(4));
    }

    #[test]
    fn test_discount_takes_first_match_in_table_order() {
        let bounds = RatingBounds::default();
        // 故意不排序：引擎不重新排序
        let rules = vec![
            DiscountRule::new(500, dec!(4)),
            DiscountRule::new(1500, dec!(12)),
        ];

        assert_eq!(compute_discount_percent(5000, 2000, &bounds, &rules), dec!(4));
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let bounds = RatingBounds::default();
        let errors = validate_request(&QuoteRequest::new(-1, 9000), &bounds).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field(RatingField::CurrentRating));
        assert!(errors.has_field(RatingField::DesiredRating));

        let errors = validate_request(&QuoteRequest::new(9000, 100), &bounds).unwrap_err();
        assert!(errors.has_field(RatingField::CurrentRating));
        assert!(errors.has_field(RatingField::Ordering));
    }

    #[test]
    fn test_validate_accepts_bounds_inclusive() {
        let bounds = RatingBounds::default();

        assert!(validate_request(&QuoteRequest::new(0, 8500), &bounds).is_ok());
    }

    #[test]
    fn test_quote_rejects_equal_and_reversed_ratings() {
        let config = tables();

        for request in [QuoteRequest::new(5000, 5000), QuoteRequest::new(5000, 4000)] {
            let errors =
                compute_quote(&request, &config.bounds, &config.tiers, &config.discounts)
                    .unwrap_err();
            assert_eq!(errors.len(), 1);
            assert!(errors.has_field(RatingField::Ordering));
        }
    }

    #[test]
    fn test_quote_end_to_end() {
        let config = tables();
        let request = QuoteRequest::new(5000, 6000);

        let quote =
            compute_quote(&request, &config.bounds, &config.tiers, &config.discounts).unwrap();

        assert_eq!(quote.rating_gain, 1000);
        assert_eq!(quote.base_price, dec!(1600.00));
        assert_eq!(quote.discount_percent, dec!(8));
        assert_eq!(quote.final_price, dec!(1472.00));
    }

    #[test]
    fn test_quote_without_discount_below_eligibility() {
        let config = tables();
        let request = QuoteRequest::new(2000, 4000);

        let quote =
            compute_quote(&request, &config.bounds, &config.tiers, &config.discounts).unwrap();

        assert_eq!(quote.base_price, dec!(800.00));
        assert_eq!(quote.discount_percent, Decimal::ZERO);
        assert_eq!(quote.final_price, quote.base_price);
        assert!(!quote.has_discount());
    }
}
