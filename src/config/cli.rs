use super::pricing_config::PricingConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Parser)]
#[command(name = "mmr-quote")]
#[command(about = "Quote the price of an MMR boost")]
pub struct CliConfig {
    /// Current MMR
    #[arg(long, allow_hyphen_values = true)]
    pub current: String,

    /// Desired MMR
    #[arg(long, allow_hyphen_values = true)]
    pub desired: String,

    /// Pricing TOML file; the built-in tables are used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Request an off-stream session (extra fee)")]
    pub off_stream: bool,

    #[arg(long, help = "Print the order summary and WhatsApp link")]
    pub order: bool,

    #[arg(long, help = "Print the quote as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入並驗證價目設定
    pub fn load_pricing(&self) -> Result<PricingConfig> {
        let pricing = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading pricing from: {}", path);
                PricingConfig::from_file(path)?
            }
            None => {
                tracing::debug!("Using built-in pricing tables");
                PricingConfig::default()
            }
        };
        pricing.validate()?;
        Ok(pricing)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
            validation::validate_file_extensions("config", std::slice::from_ref(path), &["toml"])?;
        }
        Ok(())
    }
}
