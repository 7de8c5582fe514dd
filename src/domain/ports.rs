use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the multiplicative price variation, expected in `[0.95, 1.05]`.
pub trait VariationSource: Send {
    fn next_variation(&mut self) -> f64;
}

/// Text-generation backend used for the maintenance tip.
#[async_trait]
pub trait AdvisoryClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
