use anyhow::Context;
use clap::Parser;
use mmr_quote::utils::{logger, validation};
use mmr_quote::utils::validation::Validate;
use mmr_quote::{BatchQuoter, PricingConfig, PricingEngine, QuoteError};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};

#[derive(Parser)]
#[command(name = "batch-quote")]
#[command(about = "Quote every request in a CSV file")]
struct Args {
    /// CSV file with `current_rating,desired_rating` columns
    #[arg(short, long)]
    input: String,

    /// Output CSV; written to stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Pricing TOML file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines on stderr
    #[arg(long)]
    json_logs: bool,
}

fn check_args(args: &Args) -> Result<PricingConfig, QuoteError> {
    validation::validate_path("input", &args.input)?;
    validation::validate_file_extensions("input", std::slice::from_ref(&args.input), &["csv"])?;
    if let Some(output) = &args.output {
        validation::validate_path("output", output)?;
    }

    let pricing = match &args.config {
        Some(path) => PricingConfig::from_file(path)?,
        None => PricingConfig::default(),
    };
    pricing.validate()?;
    Ok(pricing)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("🚀 Starting batch quote for {}", args.input);

    let pricing = match check_args(&args) {
        Ok(pricing) => pricing,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let engine = PricingEngine::from_provider(&pricing);
    let quoter = BatchQuoter::new(&engine);

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input file '{}'", args.input))?;
    let input = BufReader::new(input);

    let summary = match &args.output {
        Some(path) => {
            let output = File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path))?;
            quoter.run(input, BufWriter::new(output))?
        }
        None => quoter.run(input, io::stdout().lock())?,
    };

    eprintln!(
        "✅ {} requests: {} quoted, {} rejected",
        summary.total, summary.quoted, summary.rejected
    );

    Ok(())
}
