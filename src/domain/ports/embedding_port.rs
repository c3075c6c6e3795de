use crate::domain::error::DomainError;

/// External text encoder. Every stored and query vector goes through the
/// same call, so both sides of a comparison share one encoding and precision.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// One vector per input text, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Output dimension, or 0 when it is only known after the first call.
    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}
