use crate::core::pricing::checked_table_price;
use crate::domain::model::{DiscountRule, PriceTier, RatingBounds};
use crate::domain::ports::PricingProvider;
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub bounds: RatingBounds,
    #[serde(default = "default_tiers")]
    pub tiers: Vec<PriceTier>,
    #[serde(default = "default_discounts")]
    pub discounts: Vec<DiscountRule>,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub order: OrderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub shop_name: String,
    pub game: String,
    pub link_base: String,
    /// 含國碼與區碼的 WhatsApp 號碼，只允許數字
    pub contact_number: Option<String>,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            shop_name: "SEKAI-DOTA-BOOST".to_string(),
            game: "Dota 2".to_string(),
            link_base: "https://wa.me".to_string(),
            contact_number: None,
        }
    }
}

fn default_tiers() -> Vec<PriceTier> {
    vec![
        PriceTier::new(0, 4000, dec!(0.40)),
        PriceTier::new(4001, 4500, dec!(0.65)),
        PriceTier::new(4501, 5000, dec!(0.75)),
        PriceTier::new(5001, 5500, dec!(1.10)),
        PriceTier::new(5501, 6000, dec!(2.10)),
        PriceTier::new(6001, 6500, dec!(3.20)),
        PriceTier::new(6501, 7000, dec!(3.80)),
        PriceTier::new(7001, 7500, dec!(4.75)),
        PriceTier::new(7501, 8000, dec!(7.60)),
        PriceTier::new(8001, 8500, dec!(8.50)),
    ]
}

fn default_discounts() -> Vec<DiscountRule> {
    vec![
        DiscountRule::new(1500, dec!(12)),
        DiscountRule::new(1250, dec!(10)),
        DiscountRule::new(1000, dec!(8)),
        DiscountRule::new(750, dec!(6)),
        DiscountRule::new(500, dec!(4)),
    ]
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            bounds: RatingBounds::default(),
            tiers: default_tiers(),
            discounts: default_discounts(),
            display: DisplayConfig::default(),
            order: OrderConfig::default(),
        }
    }
}

impl PricingConfig {
    /// 從 TOML 檔案載入價目設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析，未填寫的區段使用內建價目表
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WHATSAPP_NUMBER})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.validate_bounds()?;
        self.validate_tiers()?;
        self.validate_discounts()?;
        self.validate_order()?;
        Ok(())
    }

    fn validate_bounds(&self) -> Result<()> {
        if self.bounds.min_rating > self.bounds.max_rating {
            return Err(QuoteError::InvalidConfigValueError {
                field: "bounds.min_rating".to_string(),
                value: self.bounds.min_rating.to_string(),
                reason: format!("Must not exceed bounds.max_rating ({})", self.bounds.max_rating),
            });
        }
        // 無效輸入的哨兵值是 min_rating - 1，需要留出空間
        if self.bounds.min_rating == i64::MIN {
            return Err(QuoteError::InvalidConfigValueError {
                field: "bounds.min_rating".to_string(),
                value: self.bounds.min_rating.to_string(),
                reason: "Must be greater than the smallest 64-bit integer".to_string(),
            });
        }
        // rating_gain 必須放得進 i64
        if self.bounds.max_rating.checked_sub(self.bounds.min_rating).is_none() {
            return Err(QuoteError::InvalidConfigValueError {
                field: "bounds.max_rating".to_string(),
                value: self.bounds.max_rating.to_string(),
                reason: format!(
                    "Range from bounds.min_rating ({}) does not fit in a 64-bit integer",
                    self.bounds.min_rating
                ),
            });
        }
        Ok(())
    }

    fn validate_tiers(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(QuoteError::MissingConfigError {
                field: "tiers".to_string(),
            });
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            let field = format!("tiers[{}]", i);
            if tier.min > tier.max {
                return Err(QuoteError::InvalidConfigValueError {
                    field,
                    value: format!("{}..={}", tier.min, tier.max),
                    reason: "Tier min must not exceed max".to_string(),
                });
            }
            if tier.unit_price < Decimal::ZERO {
                return Err(QuoteError::InvalidConfigValueError {
                    field: format!("{}.unit_price", field),
                    value: tier.unit_price.to_string(),
                    reason: "Unit price cannot be negative".to_string(),
                });
            }
        }

        for (i, pair) in self.tiers.windows(2).enumerate() {
            if pair[0].max.checked_add(1) != Some(pair[1].min) {
                return Err(QuoteError::InvalidConfigValueError {
                    field: format!("tiers[{}].min", i + 1),
                    value: pair[1].min.to_string(),
                    reason: format!(
                        "Tiers must be contiguous: each tier must start right after previous max {}",
                        pair[0].max
                    ),
                });
            }
        }

        if checked_table_price(&self.tiers).is_none() {
            return Err(QuoteError::InvalidConfigValueError {
                field: "tiers".to_string(),
                value: format!("{} tiers", self.tiers.len()),
                reason: "Total price across all tiers exceeds the supported decimal range"
                    .to_string(),
            });
        }

        Ok(())
    }

    fn validate_discounts(&self) -> Result<()> {
        for (i, rule) in self.discounts.iter().enumerate() {
            validation::validate_range(
                &format!("discounts[{}].discount_percent", i),
                rule.discount_percent,
                Decimal::ZERO,
                Decimal::ONE_HUNDRED,
            )?;
            validation::validate_range(
                &format!("discounts[{}].min_gain_threshold", i),
                rule.min_gain_threshold,
                0,
                i64::MAX,
            )?;
        }

        // 引擎只取第一個符合的規則，未排序的表格不拒絕但提醒
        let descending = self
            .discounts
            .windows(2)
            .all(|pair| pair[0].min_gain_threshold > pair[1].min_gain_threshold);
        if !descending {
            tracing::warn!(
                "⚠️ Discount rules are not sorted by descending threshold; the first matching rule in file order wins"
            );
        }

        Ok(())
    }

    fn validate_order(&self) -> Result<()> {
        validation::validate_non_empty_string("order.shop_name", &self.order.shop_name)?;
        validation::validate_url("order.link_base", &self.order.link_base)?;
        if let Some(number) = &self.order.contact_number {
            validation::validate_digits("order.contact_number", number)?;
        }
        Ok(())
    }
}

impl PricingProvider for PricingConfig {
    fn bounds(&self) -> RatingBounds {
        self.bounds
    }

    fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }

    fn discount_rules(&self) -> &[DiscountRule] {
        &self.discounts
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
