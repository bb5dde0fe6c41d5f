use crate::config::pricing_config::DisplayConfig;
use crate::domain::model::{QuoteResult, ValidationErrors};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// 顯示用金額一律四捨五入到兩位小數
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

pub fn format_currency(amount: Decimal, display: &DisplayConfig) -> String {
    let text = round_currency(amount)
        .to_string()
        .replace('.', &display.decimal_separator.to_string());
    format!("{} {}", display.currency_symbol, text)
}

pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", percent.normalize())
}

pub fn group_thousands(value: i64, separator: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }

    grouped
}

/// 一份已格式化、可直接顯示的報價
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteView {
    pub rating_gain: String,
    pub base_price: String,
    pub final_price: String,
    /// 只有在有折扣時才顯示折扣區塊
    pub discount_text: Option<String>,
}

impl QuoteView {
    pub fn from_quote(quote: &QuoteResult, display: &DisplayConfig) -> Self {
        Self {
            rating_gain: group_thousands(quote.rating_gain, display.thousands_separator),
            base_price: format_currency(quote.base_price, display),
            final_price: format_currency(quote.final_price, display),
            discount_text: quote
                .has_discount()
                .then(|| format_percent(quote.discount_percent)),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("MMR to gain:  {}", self.rating_gain),
            format!("Base price:   {}", self.base_price),
        ];
        if let Some(discount) = &self.discount_text {
            lines.push(format!("Discount:     {}", discount));
        }
        lines.push(format!("Final price:  {}", self.final_price));
        lines.join("\n")
    }
}

pub fn render_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|e| format!("❌ {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
