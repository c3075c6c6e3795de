use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::values::embedding::Embedding;
use crate::domain::values::interest_set::InterestSet;
use std::sync::Arc;

/// Strings sent to the provider per request.
pub const EMBED_BATCH_SIZE: usize = 32;

/// Turns an interest list into one vector: each interest is encoded on its
/// own, then the vectors are averaged with equal weight.
#[derive(Clone)]
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
}

impl Embedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Provider output dimension, 0 if unknown before the first call.
    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    pub async fn embed(&self, interests: &InterestSet) -> Result<Embedding, DomainError> {
        self.embed_many(std::slice::from_ref(interests))
            .await?
            .pop()
            .ok_or_else(|| DomainError::ModelFailure("no embedding produced".into()))
    }

    /// Embed several interest sets with as few provider round trips as
    /// possible. Output order matches `sets`.
    pub async fn embed_many(&self, sets: &[InterestSet]) -> Result<Vec<Embedding>, DomainError> {
        let texts: Vec<String> = sets
            .iter()
            .flat_map(|s| s.as_slice().iter().cloned())
            .collect();
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(EMBED_BATCH_SIZE) {
            vectors.extend(self.encode(chunk).await?);
        }

        let mut embeddings = Vec::with_capacity(sets.len());
        let mut offset = 0;
        for set in sets {
            let per_interest = &vectors[offset..offset + set.len()];
            offset += set.len();
            let mean = Embedding::mean(per_interest.iter().map(Vec::as_slice)).map_err(|e| {
                DomainError::ModelFailure(format!("inconsistent vectors from model: {e}"))
            })?;
            embeddings.push(mean);
        }
        Ok(embeddings)
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let vectors = self.provider.embed(texts).await.map_err(|e| match e {
            DomainError::ModelFailure(_) => e,
            other => DomainError::ModelFailure(other.to_string()),
        })?;

        if vectors.len() != texts.len() {
            return Err(DomainError::ModelFailure(format!(
                "model returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }

        let expected = self.provider.dimension();
        for v in &vectors {
            if v.is_empty() {
                return Err(DomainError::ModelFailure("model returned an empty vector".into()));
            }
            if expected > 0 && v.len() != expected {
                return Err(DomainError::ModelFailure(format!(
                    "model returned {} dimensions, expected {expected}",
                    v.len()
                )));
            }
            if v.iter().any(|x| !x.is_finite()) {
                return Err(DomainError::ModelFailure(
                    "model returned a non-finite component".into(),
                ));
            }
        }
        Ok(vectors)
    }
}
