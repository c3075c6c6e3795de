use crate::application::embed::Embedder;
use crate::domain::entities::user_record::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::interest_set::InterestSet;
use std::sync::Arc;

/// The vector store paired with the embedder that feeds it.
#[derive(Clone)]
pub struct UserIndex {
    embedder: Embedder,
    store: Arc<dyn VectorStore>,
}

impl UserIndex {
    pub fn new(embedder: Embedder, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    pub fn embedder(&self) -> &Embedder {
        &self.embedder
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Embed `interests` and insert or replace the user in one publish.
    /// The previous record, if any, is dropped entirely.
    pub async fn upsert(
        &self,
        id: &str,
        name: &str,
        interests: InterestSet,
    ) -> Result<UserRecord, DomainError> {
        let embedding = self.embedder.embed(&interests).await?;
        let record = UserRecord::new(id.to_string(), name.to_string(), interests, embedding);
        self.store.put(record.clone())?;
        Ok(record)
    }

    pub fn get(&self, id: &str) -> Result<UserRecord, DomainError> {
        self.store.get(id)
    }

    pub fn size(&self) -> usize {
        self.store.size()
    }
}
