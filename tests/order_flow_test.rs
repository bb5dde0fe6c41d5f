use anyhow::Result;
use mmr_quote::adapters::presentation::render_errors;
use mmr_quote::utils::validation::Validate;
use mmr_quote::{
    OrderDetails, OrderMessage, PricingConfig, PricingEngine, QuoteError, QuoteRequest, QuoteView,
    RatingField,
};
use std::io::Write;
use tempfile::NamedTempFile;

const PRICING_TOML: &str = r#"
[bounds]
min_rating = 0
max_rating = 8500
min_rating_for_discount_eligibility = 4000

[display]
currency_symbol = "R$"

[order]
shop_name = "Test Boost"
contact_number = "5500000000000"
"#;

/// 從原始文字輸入到下單連結的完整流程
#[test]
fn test_raw_input_to_order_link() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(PRICING_TOML.as_bytes())?;

    let pricing = PricingConfig::from_file(file.path())?;
    pricing.validate()?;

    let engine = PricingEngine::from_provider(&pricing);
    let request = QuoteRequest::from_raw(" 5000 ", "6000", engine.bounds());
    let quote = engine.quote(&request)?;

    let view = QuoteView::from_quote(&quote, &pricing.display);
    assert_eq!(view.base_price, "R$ 1600,00");
    assert_eq!(view.final_price, "R$ 1472,00");
    assert_eq!(view.discount_text.as_deref(), Some("8%"));

    let order = OrderDetails {
        request,
        quote,
        off_stream: true,
    };
    let message = OrderMessage::new(&order, &pricing.display, &pricing.order);

    let summary = message.summary();
    assert!(summary.contains("Pedido (Test Boost) - Dota 2"));
    assert!(summary.contains("Sim (taxa extra)"));

    let link = message.deep_link()?;
    assert_eq!(link.host_str(), Some("wa.me"));
    assert_eq!(link.path(), "/5500000000000");
    assert!(link.query().unwrap_or_default().starts_with("text="));

    Ok(())
}

#[test]
fn test_non_numeric_input_is_never_quoted() {
    let engine = PricingEngine::default();
    let request = QuoteRequest::from_raw("mil", "", engine.bounds());

    let errors = engine.quote(&request).unwrap_err();

    assert!(errors.has_field(RatingField::CurrentRating));
    assert!(errors.has_field(RatingField::DesiredRating));

    let rendered = render_errors(&errors);
    assert!(rendered.contains("current_rating: rating must be between 0 and 8500"));
}

#[test]
fn test_validation_error_maps_to_input_exit_code() {
    let engine = PricingEngine::default();
    let errors = engine.quote(&QuoteRequest::new(6000, 5000)).unwrap_err();

    let err = QuoteError::from(errors);

    assert_eq!(err.exit_code(), 1);
    assert!(err.user_friendly_message().contains("ordering"));
}

#[test]
fn test_invalid_tier_table_fails_validation() -> Result<()> {
    let toml_content = r#"
[[tiers]]
min = 0
max = 100
unit_price = 1.0

[[tiers]]
min = 150
max = 200
unit_price = 2.0
"#;

    let pricing = PricingConfig::from_toml_str(toml_content)?;
    let err = pricing.validate().unwrap_err();

    assert!(matches!(err, QuoteError::InvalidConfigValueError { .. }));
    assert_eq!(err.exit_code(), 3);
    Ok(())
}

#[test]
fn test_example_pricing_file_matches_builtin_tables() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/pricing.example.toml");
    let pricing = PricingConfig::from_file(path)?;
    pricing.validate()?;

    let builtin = PricingConfig::default();
    assert_eq!(pricing.tiers, builtin.tiers);
    assert_eq!(pricing.discounts, builtin.discounts);
    assert_eq!(pricing.bounds, builtin.bounds);
    assert_eq!(pricing.order.contact_number, None);
    Ok(())
}
