use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一段連續的 rating 區間與其單位價格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub min: i64,
    pub max: i64,
    pub unit_price: Decimal,
}

impl PriceTier {
    pub fn new(min: i64, max: i64, unit_price: Decimal) -> Self {
        Self {
            min,
            max,
            unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub min_gain_threshold: i64,
    pub discount_percent: Decimal,
}

impl DiscountRule {
    pub fn new(min_gain_threshold: i64, discount_percent: Decimal) -> Self {
        Self {
            min_gain_threshold,
            discount_percent,
        }
    }
}

/// 驗證範圍與折扣門檻
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBounds {
    pub min_rating: i64,
    pub max_rating: i64,
    pub min_rating_for_discount_eligibility: i64,
}

impl Default for RatingBounds {
    fn default() -> Self {
        Self {
            min_rating: 0,
            max_rating: 8500,
            min_rating_for_discount_eligibility: 4000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub current_rating: i64,
    pub desired_rating: i64,
}

impl QuoteRequest {
    pub fn new(current_rating: i64, desired_rating: i64) -> Self {
        Self {
            current_rating,
            desired_rating,
        }
    }

    /// 超出 i64 時飽和到邊界值
    pub fn rating_gain(&self) -> i64 {
        self.desired_rating.saturating_sub(self.current_rating)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub rating_gain: i64,
    pub base_price: Decimal,
    pub final_price: Decimal,
    pub discount_percent: Decimal,
}

impl QuoteResult {
    pub fn has_discount(&self) -> bool {
        self.discount_percent > Decimal::ZERO
    }
}

/// 報價加上下單時才需要的附加資訊
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub request: QuoteRequest,
    pub quote: QuoteResult,
    pub off_stream: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingField {
    CurrentRating,
    DesiredRating,
    Ordering,
}

impl RatingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingField::CurrentRating => "current_rating",
            RatingField::DesiredRating => "desired_rating",
            RatingField::Ordering => "ordering",
        }
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: RatingField,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: RatingField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// 一次回報所有違規欄位，讓使用者一次看到全部問題
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: RatingField) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn for_field(&self, field: RatingField) -> impl Iterator<Item = &ValidationError> {
        self.0.iter().filter(move |e| e.field == field)
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&lines.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}
