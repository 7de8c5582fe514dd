pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::GeminiClient;
pub use config::toml_config::TomlConfig;
pub use crate::core::advisor::{Advisor, Submission};
pub use crate::core::estimator::{FixedVariation, PriceEstimator, RandomVariation};
pub use crate::core::session::{reduce, SessionEvent, SessionState};
pub use utils::error::{AdvisorError, Result};
