use car_price_advisor::core::batch::estimate_csv;
use car_price_advisor::utils::logger;
use car_price_advisor::utils::validation::{validate_file_extension, validate_path};
use car_price_advisor::{AdvisorError, PriceEstimator, RandomVariation};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter};

#[derive(Parser, Debug)]
#[command(name = "batch_estimate")]
#[command(about = "Estimate resale prices for every vehicle in a CSV file")]
struct Args {
    /// CSV with brand,fuel_type,transmission,mileage,years_used,accident,clean_title columns
    #[arg(short, long)]
    input: String,

    /// Where to write the priced CSV
    #[arg(short, long)]
    output: String,

    /// Seed for the price variation
    #[arg(long)]
    seed: Option<u64>,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), AdvisorError> {
    validate_path("input", &args.input)?;
    validate_path("output", &args.output)?;
    validate_file_extension("input", &args.input, &["csv"])?;
    validate_file_extension("output", &args.output, &["csv"])?;

    let input = BufReader::new(File::open(&args.input)?);
    let output = BufWriter::new(File::create(&args.output)?);
    let mut estimator = PriceEstimator::new(RandomVariation::from_seed_option(args.seed));

    let summary = estimate_csv(input, output, &mut estimator)?;
    println!(
        "✅ Estimated {} vehicles ({} skipped)",
        summary.estimated, summary.skipped
    );
    println!("📁 Output saved to: {}", args.output);
    Ok(())
}

fn main() {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting batch estimation from: {}", args.input);

    if let Err(e) = run(&args) {
        tracing::error!("❌ Batch estimation failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
