use crate::application::embed::Embedder;
use crate::application::rank::SimilarityRanker;
use crate::application::registry::UserRegistry;
use crate::domain::entities::similarity_result::SimilarityResult;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::interest_set::InterestSet;
use serde::Serialize;
use std::sync::Arc;

/// Matches returned when the caller does not ask for a count.
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct WalkUpMatch {
    /// Set when the query was also registered as a walk-up user.
    pub registered_id: Option<String>,
    pub similar_users: Vec<SimilarityResult>,
}

pub struct FindSimilarUseCase {
    embedder: Embedder,
    store: Arc<dyn VectorStore>,
    registry: Arc<UserRegistry>,
}

impl FindSimilarUseCase {
    pub fn new(embedder: Embedder, store: Arc<dyn VectorStore>, registry: Arc<UserRegistry>) -> Self {
        Self {
            embedder,
            store,
            registry,
        }
    }

    /// Rank the population against comma-separated interests.
    ///
    /// With `register`, the query is ranked first and then indexed as a
    /// walk-up user, so it never appears in its own results.
    pub async fn find_similar(
        &self,
        raw_interests: &str,
        k: usize,
        register: bool,
    ) -> Result<WalkUpMatch, DomainError> {
        let interests = InterestSet::parse(raw_interests)?;
        let query = self.embedder.embed(&interests).await?;
        let snapshot = self.store.all();
        let similar_users = SimilarityRanker::rank_snapshot(&query, &snapshot, k, None);

        let registered_id = if register {
            Some(self.registry.register_embedded(interests, query)?)
        } else {
            None
        };

        Ok(WalkUpMatch {
            registered_id,
            similar_users,
        })
    }

    /// Resync from the user store, then rank. Each call sees the store as it
    /// is now, at the cost of re-embedding the whole population.
    pub async fn sync_and_find(
        &self,
        raw_interests: &str,
        k: usize,
    ) -> Result<Vec<SimilarityResult>, DomainError> {
        // Validate before paying for a sync.
        InterestSet::parse(raw_interests)?;
        self.registry.sync().await?;
        Ok(self.find_similar(raw_interests, k, false).await?.similar_users)
    }

    /// Nearest neighbors of an indexed user, excluding the user itself.
    pub fn similar_to_user(&self, id: &str, k: usize) -> Result<Vec<SimilarityResult>, DomainError> {
        let snapshot = self.store.all();
        let record = snapshot
            .get(id)
            .ok_or_else(|| DomainError::NotFound(format!("user {id}")))?;
        Ok(SimilarityRanker::rank_snapshot(
            &record.embedding,
            &snapshot,
            k,
            Some(id),
        ))
    }
}
