pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::add_user::AddUserUseCase;
use crate::application::embed::Embedder;
use crate::application::registry::{SyncReport, UserRegistry};
use crate::application::similar::{FindSimilarUseCase, WalkUpMatch};
use crate::application::stats::{IndexStats, StatsUseCase};
use crate::application::user_index::UserIndex;
use crate::config::Config;
use crate::domain::entities::similarity_result::SimilarityResult;
use crate::domain::entities::user_record::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::user_repository::{RawUser, UserRepository};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::interest_set::InterestSet;
use crate::infrastructure::memory::vector_store::InMemoryVectorStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::user_repo::SqliteUserRepo;
use rusqlite::Connection;
use std::sync::Arc;

pub struct Affinity {
    repo: Arc<dyn UserRepository>,
    index: UserIndex,
    registry: Arc<UserRegistry>,
    add_user_uc: AddUserUseCase,
    similar_uc: FindSimilarUseCase,
    stats_uc: StatsUseCase,
}

impl Affinity {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let embedder = config.build_embedder()?;
        Self::with_providers(&config.db_path, embedder)
    }

    pub fn with_providers(
        db_path: &str,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        if db_path != ":memory:" {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        }
        run_migrations(&conn)?;

        let repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepo::new(conn));
        let store: Arc<dyn VectorStore> =
            Arc::new(InMemoryVectorStore::with_dimension(Some(embedder.dimension())));
        Ok(Self::with_parts(repo, embedder, store))
    }

    /// Wire the use cases around explicit collaborators. Each instance owns
    /// its own index, so several can coexist in one process.
    pub fn with_parts(
        repo: Arc<dyn UserRepository>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        let embedder = Embedder::new(embedder);
        let index = UserIndex::new(embedder.clone(), store.clone());
        let registry = Arc::new(UserRegistry::new(repo.clone(), index.clone()));

        Self {
            add_user_uc: AddUserUseCase::new(repo.clone()),
            similar_uc: FindSimilarUseCase::new(embedder.clone(), store.clone(), registry.clone()),
            stats_uc: StatsUseCase::new(repo.clone(), store, embedder),
            repo,
            index,
            registry,
        }
    }

    // Delegating methods
    pub fn add_user(&self, name: &str, interests: Vec<String>) -> Result<String, DomainError> {
        self.add_user_uc.execute(name, interests)
    }

    pub fn users(&self) -> Result<Vec<RawUser>, DomainError> {
        self.repo.fetch_all()
    }

    pub async fn sync(&self) -> Result<SyncReport, DomainError> {
        self.registry.sync().await
    }

    pub async fn register_ad_hoc(&self, raw_interests: &str) -> Result<String, DomainError> {
        self.registry.register_ad_hoc(raw_interests).await
    }

    pub async fn upsert(
        &self,
        id: &str,
        name: &str,
        interests: InterestSet,
    ) -> Result<UserRecord, DomainError> {
        self.index.upsert(id, name, interests).await
    }

    pub fn get(&self, id: &str) -> Result<UserRecord, DomainError> {
        self.index.get(id)
    }

    pub fn index(&self) -> &UserIndex {
        &self.index
    }

    pub async fn find_similar(
        &self,
        raw_interests: &str,
        k: usize,
        register: bool,
    ) -> Result<WalkUpMatch, DomainError> {
        self.similar_uc.find_similar(raw_interests, k, register).await
    }

    pub async fn sync_and_find(
        &self,
        raw_interests: &str,
        k: usize,
    ) -> Result<Vec<SimilarityResult>, DomainError> {
        self.similar_uc.sync_and_find(raw_interests, k).await
    }

    pub fn similar_to_user(&self, id: &str, k: usize) -> Result<Vec<SimilarityResult>, DomainError> {
        self.similar_uc.similar_to_user(id, k)
    }

    pub fn stats(&self) -> Result<IndexStats, DomainError> {
        self.stats_uc.stats()
    }
}
