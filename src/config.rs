use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::infrastructure::embeddings::hashing::{HashingProvider, DEFAULT_HASHING_DIM};
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::embeddings::voyage::VoyageProvider;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DB_PATH: &str = "./affinity.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Hashing,
    OpenAi,
    Voyage,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" => Ok(ProviderKind::Hashing),
            "openai" => Ok(ProviderKind::OpenAi),
            "voyage" => Ok(ProviderKind::Voyage),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

/// Runtime settings, read from `AFFINITY_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub hashing_dim: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = lookup("AFFINITY_EMBEDDING_PROVIDER")
            .map(|p| p.parse::<ProviderKind>())
            .transpose()
            .map_err(DomainError::InvalidInput)?
            .unwrap_or(ProviderKind::Hashing);
        let hashing_dim = lookup("AFFINITY_EMBEDDING_DIM")
            .map(|d| {
                d.parse::<usize>().map_err(|e| {
                    DomainError::InvalidInput(format!("AFFINITY_EMBEDDING_DIM '{d}': {e}"))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_HASHING_DIM);

        Ok(Self {
            db_path: lookup("AFFINITY_DB").unwrap_or_else(|| DEFAULT_DB_PATH.into()),
            provider,
            api_key: lookup("AFFINITY_EMBEDDING_API_KEY").unwrap_or_default(),
            model: lookup("AFFINITY_EMBEDDING_MODEL"),
            base_url: lookup("AFFINITY_EMBEDDING_BASE_URL"),
            hashing_dim,
        })
    }

    pub fn build_embedder(&self) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let embedder: Arc<dyn EmbeddingProvider> = match self.provider {
            ProviderKind::Hashing => Arc::new(HashingProvider::new(self.hashing_dim)?),
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                self.api_key.clone(),
                self.model.clone(),
                self.base_url.clone(),
            )),
            ProviderKind::Voyage => Arc::new(VoyageProvider::new(
                self.api_key.clone(),
                self.model.clone(),
                self.base_url.clone(),
            )),
        };
        Ok(embedder)
    }
}
