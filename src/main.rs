use car_price_advisor::utils::error::{AdvisorError, ErrorSeverity};
use car_price_advisor::utils::{logger, validation::Validate};
use car_price_advisor::{
    Advisor, CliConfig, GeminiClient, PriceEstimator, RandomVariation, SessionState, TomlConfig,
};
use clap::Parser;

fn exit_with(e: &AdvisorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn load_config(config: &CliConfig) -> Result<TomlConfig, AdvisorError> {
    let toml_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    toml_config.validate()?;
    Ok(toml_config)
}

fn build_client(toml_config: &TomlConfig) -> Result<Option<GeminiClient>, AdvisorError> {
    match toml_config.api_key() {
        Some(api_key) => Ok(Some(GeminiClient::new(api_key, &toml_config.advisory)?)),
        None => {
            tracing::warn!("GEMINI_API_KEY is not set; AI tips are unavailable");
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let toml_config = load_config(&config).unwrap_or_else(|e| exit_with(&e));
    let submission = config.submission();

    let client = if submission.tip {
        build_client(&toml_config).unwrap_or_else(|e| exit_with(&e))
    } else {
        None
    };

    let seed = config.seed.or(toml_config.seed());
    let estimator = PriceEstimator::new(RandomVariation::from_seed_option(seed));
    let mut advisor = Advisor::new(estimator, client);

    let state = SessionState::new(config.form_input());
    let state = advisor.submit(&state, submission).await;

    if let Some(price) = state.formatted_prediction() {
        println!("Predicted Price: ${}", price);
    }
    if let Some(tip) = &state.tip {
        println!("\nAI Tip:\n{}", tip);
    }
    if let Some(error) = &state.error {
        eprintln!("❌ {}", error);
        std::process::exit(1);
    }

    Ok(())
}
