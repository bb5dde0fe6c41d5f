use anyhow::Context;
use clap::Parser;
use mmr_quote::adapters::presentation::render_errors;
use mmr_quote::utils::{logger, validation::Validate};
use mmr_quote::{
    CliConfig, OrderDetails, OrderMessage, PricingEngine, QuoteError, QuoteRequest, QuoteView,
};
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    request: &'a QuoteRequest,
    quote: &'a mmr_quote::QuoteResult,
    display: &'a QuoteView,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_link: Option<String>,
}

fn exit_with(e: &QuoteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let pricing = match config.load_pricing() {
        Ok(pricing) => pricing,
        Err(e) => exit_with(&e),
    };

    let engine = PricingEngine::from_provider(&pricing);
    let request = QuoteRequest::from_raw(&config.current, &config.desired, engine.bounds());

    let quote = match engine.quote(&request) {
        Ok(quote) => quote,
        Err(errors) => {
            tracing::warn!("Quote rejected with {} validation error(s)", errors.len());
            eprintln!("{}", render_errors(&errors));
            std::process::exit(QuoteError::from(errors).exit_code());
        }
    };

    let view = QuoteView::from_quote(&quote, &pricing.display);
    let order = OrderDetails {
        request,
        quote: quote.clone(),
        off_stream: config.off_stream,
    };
    let message = OrderMessage::new(&order, &pricing.display, &pricing.order);

    let order_link = if config.order {
        match message.deep_link() {
            Ok(link) => Some(link.to_string()),
            Err(e) => exit_with(&e),
        }
    } else {
        None
    };

    if config.json {
        let output = JsonOutput {
            request: &request,
            quote: &quote,
            display: &view,
            order_link,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize quote")?
        );
        return Ok(());
    }

    println!("{}", view.render());

    if let Some(link) = order_link {
        println!();
        println!("{}", message.summary());
        println!();
        println!("🔗 {}", link);
    }

    Ok(())
}
