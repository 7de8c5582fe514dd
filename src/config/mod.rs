pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::advisor::Submission;
#[cfg(feature = "cli")]
use crate::domain::model::FormInput;
#[cfg(feature = "cli")]
use crate::utils::error::{AdvisorError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "car-price-advisor")]
#[command(about = "Estimate a used car's resale price and ask for a mechanic's tip")]
pub struct CliConfig {
    #[arg(long, default_value = "gasoline", help = "gasoline, diesel, electric or hybrid")]
    pub fuel_type: String,

    #[arg(long, default_value = "automatic", help = "automatic, manual or cvt")]
    pub transmission: String,

    #[arg(long, default_value = "black")]
    pub color: String,

    #[arg(long, default_value = "yes", help = "yes or no")]
    pub clean_title: String,

    #[arg(long, default_value = "0")]
    pub mileage: String,

    #[arg(long, default_value = "0", help = "Number of accidents")]
    pub accident: String,

    #[arg(long, default_value = "toyota")]
    pub brand: String,

    #[arg(long, default_value = "0")]
    pub years_used: String,

    #[arg(long, default_value = "")]
    pub model: String,

    #[arg(long, default_value = "sale", help = "sale or trade")]
    pub trade_type: String,

    #[arg(long, help = "Ask the advisory service for a tip")]
    pub tip: bool,

    #[arg(long, help = "Do not estimate the price")]
    pub skip_estimate: bool,

    #[arg(long, help = "Seed for the price variation")]
    pub seed: Option<u64>,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn form_input(&self) -> FormInput {
        FormInput {
            fuel_type: self.fuel_type.clone(),
            transmission: self.transmission.clone(),
            color: self.color.clone(),
            clean_title: self.clean_title.clone(),
            mileage: self.mileage.clone(),
            accident: self.accident.clone(),
            brand: self.brand.clone(),
            years_used: self.years_used.clone(),
            model: self.model.clone(),
            trade_type: self.trade_type.clone(),
        }
    }

    pub fn submission(&self) -> Submission {
        Submission {
            estimate: !self.skip_estimate,
            tip: self.tip,
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }

        if self.skip_estimate && !self.tip {
            return Err(AdvisorError::ConfigError {
                message: "--skip-estimate without --tip leaves nothing to do".to_string(),
            });
        }

        Ok(())
    }
}
