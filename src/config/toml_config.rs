use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub advisory: AdvisoryConfig,
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// No timeout unless set.
    pub timeout_seconds: Option<u64>,
    pub generation: GenerationConfig,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_seconds: None,
            generation: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Fixed seed for the price variation; random per run when absent.
    pub seed: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdvisorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdvisorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("advisory.endpoint", &self.advisory.endpoint)?;
        validate_non_empty_string("advisory.model", &self.advisory.model)?;

        let generation = &self.advisory.generation;
        validate_range("advisory.generation.temperature", generation.temperature, 0.0, 2.0)?;
        validate_range("advisory.generation.top_p", generation.top_p, 0.0, 1.0)?;
        validate_positive_number("advisory.generation.top_k", generation.top_k, 1)?;
        validate_positive_number(
            "advisory.generation.max_output_tokens",
            generation.max_output_tokens,
            1,
        )?;

        if let Some(timeout) = self.advisory.timeout_seconds {
            validate_range("advisory.timeout_seconds", timeout, 1, 600)?;
        }

        Ok(())
    }

    /// Key from the config file, falling back to `GEMINI_API_KEY`.
    ///
    /// A placeholder whose variable was not set counts as missing.
    pub fn api_key(&self) -> Option<String> {
        self.advisory
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
            .map(str::to_string)
            .or_else(|| {
                std::env::var(API_KEY_ENV)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    pub fn seed(&self) -> Option<u64> {
        self.estimator.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
