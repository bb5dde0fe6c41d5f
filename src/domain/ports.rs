use crate::domain::model::{DiscountRule, PriceTier, RatingBounds};

/// 提供報價引擎所需的靜態資料表
pub trait PricingProvider: Send + Sync {
    fn bounds(&self) -> RatingBounds;
    fn tiers(&self) -> &[PriceTier];
    fn discount_rules(&self) -> &[DiscountRule];
}
