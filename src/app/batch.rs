use crate::adapters::presentation::round_currency;
use crate::core::engine::PricingEngine;
use crate::domain::model::QuoteRequest;
use crate::utils::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Deserialize)]
struct RawRequest {
    #[serde(default)]
    current_rating: String,
    #[serde(default)]
    desired_rating: String,
}

/// 報表中的一列。被拒絕的請求只有 `error` 欄位有值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub current_rating: String,
    pub desired_rating: String,
    pub rating_gain: Option<i64>,
    pub base_price: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub final_price: Option<Decimal>,
    pub error: Option<String>,
}

impl QuoteRow {
    fn rejected(current_rating: String, desired_rating: String, error: String) -> Self {
        Self {
            current_rating,
            desired_rating,
            rating_gain: None,
            base_price: None,
            discount_percent: None,
            final_price: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub quoted: usize,
    pub rejected: usize,
}

pub struct BatchQuoter<'a> {
    engine: &'a PricingEngine,
}

impl<'a> BatchQuoter<'a> {
    pub fn new(engine: &'a PricingEngine) -> Self {
        Self { engine }
    }

    pub fn quote_raw(&self, current: &str, desired: &str) -> QuoteRow {
        let request = QuoteRequest::from_raw(current, desired, self.engine.bounds());

        match self.engine.quote(&request) {
            Ok(quote) => QuoteRow {
                current_rating: current.to_string(),
                desired_rating: desired.to_string(),
                rating_gain: Some(quote.rating_gain),
                base_price: Some(round_currency(quote.base_price)),
                discount_percent: Some(quote.discount_percent.normalize()),
                final_price: Some(round_currency(quote.final_price)),
                error: None,
            },
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                QuoteRow::rejected(current.to_string(), desired.to_string(), message)
            }
        }
    }

    /// 讀取 `current_rating,desired_rating` CSV，每個請求寫出一列報價。
    /// 無效的列只記錄錯誤，不會中止整批處理。
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<BatchSummary> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input);
        let mut writer = csv::Writer::from_writer(output);
        let mut summary = BatchSummary::default();

        // 以位元組讀取，非 UTF-8 的列仍能保留原始內容回報
        let headers = reader.byte_headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name.as_bytes());
        let current_col = column("current_rating");
        let desired_col = column("desired_rating");

        for record in reader.byte_records() {
            let record = record?;
            let row = match record.deserialize::<RawRequest>(Some(&headers)) {
                Ok(raw) => self.quote_raw(&raw.current_rating, &raw.desired_rating),
                Err(e) => {
                    let line = record.position().map_or(0, |p| p.line());
                    tracing::warn!("⚠️ Malformed row at line {}: {}", line, e);
                    let raw_field = |col: Option<usize>| {
                        col.and_then(|i| record.get(i))
                            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                            .unwrap_or_default()
                    };
                    QuoteRow::rejected(
                        raw_field(current_col),
                        raw_field(desired_col),
                        format!("malformed row at line {}: {}", line, e),
                    )
                }
            };

            summary.total += 1;
            if row.error.is_some() {
                summary.rejected += 1;
            } else {
                summary.quoted += 1;
            }
            writer.serialize(&row)?;
        }

        writer.flush()?;

        tracing::info!(
            "Batch finished: {} requests, {} quoted, {} rejected",
            summary.total,
            summary.quoted,
            summary.rejected
        );
        Ok(summary)
    }
}
