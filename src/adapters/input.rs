use crate::domain::model::{QuoteRequest, RatingBounds};

/// 無法解析的輸入一律轉成保證驗證失敗的值，絕不默默變成合法的 rating
pub fn invalid_rating(bounds: &RatingBounds) -> i64 {
    if bounds.min_rating > i64::MIN {
        bounds.min_rating - 1
    } else {
        bounds.max_rating.saturating_add(1)
    }
}

pub fn parse_rating(raw: &str, bounds: &RatingBounds) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(rating) => rating,
        Err(e) => {
            tracing::debug!("Could not parse rating '{}': {}", raw, e);
            invalid_rating(bounds)
        }
    }
}

impl QuoteRequest {
    pub fn from_raw(current: &str, desired: &str, bounds: &RatingBounds) -> Self {
        Self::new(parse_rating(current, bounds), parse_rating(desired, bounds))
    }
}
