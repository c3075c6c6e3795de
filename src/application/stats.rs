use crate::application::embed::Embedder;
use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::ports::vector_store::VectorStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub indexed_users: usize,
    pub stored_users: usize,
    pub dimension: Option<usize>,
    pub model: String,
}

pub struct StatsUseCase {
    repo: Arc<dyn UserRepository>,
    store: Arc<dyn VectorStore>,
    embedder: Embedder,
}

impl StatsUseCase {
    pub fn new(repo: Arc<dyn UserRepository>, store: Arc<dyn VectorStore>, embedder: Embedder) -> Self {
        Self { repo, store, embedder }
    }

    pub fn stats(&self) -> Result<IndexStats, DomainError> {
        let provider_dim = Some(self.embedder.dimension()).filter(|d| *d > 0);
        Ok(IndexStats {
            indexed_users: self.store.size(),
            stored_users: self.repo.count()?,
            dimension: self.store.dimension().or(provider_dim),
            model: self.embedder.model_name().to_string(),
        })
    }
}
