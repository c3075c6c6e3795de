//! Shared test helpers.
#![allow(dead_code)]

use affinity::domain::error::DomainError;
use affinity::domain::ports::embedding_port::EmbeddingProvider;
use affinity::domain::ports::user_repository::{NewUser, RawUser, UserRepository};
use affinity::domain::ports::vector_store::VectorStore;
use affinity::infrastructure::embeddings::hashing::HashingProvider;
use affinity::infrastructure::memory::vector_store::InMemoryVectorStore;
use affinity::Affinity;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn setup() -> Affinity {
    Affinity::with_providers(":memory:", Arc::new(HashingProvider::default())).unwrap()
}

/// Affinity over an in-memory user list, returning the list handle for edits.
pub fn setup_with_users(users: Vec<RawUser>) -> (Affinity, Arc<MemoryUserRepo>) {
    let repo = Arc::new(MemoryUserRepo::new(users));
    let embedder = Arc::new(HashingProvider::default());
    let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::with_dimension(Some(
        embedder.dimension(),
    )));
    let app = Affinity::with_parts(repo.clone(), embedder, store);
    (app, repo)
}

pub fn raw(id: &str, name: &str, interests: &[&str]) -> RawUser {
    RawUser {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        interests: Some(interests.iter().map(|s| s.to_string()).collect()),
        user_id: None,
    }
}

/// A small population with no overlapping interests.
pub fn demo_users() -> Vec<RawUser> {
    vec![
        raw("user1", "Ana", &["web development", "reading novels", "singing"]),
        raw("user2", "Ben", &["cooking", "watching movies", "anime"]),
        raw("user3", "Cleo", &["Design", "football", "playing guitar"]),
        raw("user4", "Dev", &["Coding", "dance", "music"]),
    ]
}

pub struct MemoryUserRepo {
    users: Mutex<Vec<RawUser>>,
    failing: AtomicBool,
}

impl MemoryUserRepo {
    pub fn new(users: Vec<RawUser>) -> Self {
        Self {
            users: Mutex::new(users),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn replace(&self, users: Vec<RawUser>) {
        *self.users.lock().unwrap() = users;
    }
}

impl UserRepository for MemoryUserRepo {
    fn fetch_all(&self) -> Result<Vec<RawUser>, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::DataSource("connection refused".into()));
        }
        Ok(self.users.lock().unwrap().clone())
    }

    fn add(&self, user: &NewUser) -> Result<String, DomainError> {
        let mut users = self.users.lock().unwrap();
        let id = format!("mem{}", users.len() + 1);
        users.push(RawUser {
            id: Some(id.clone()),
            name: Some(user.name.clone()),
            interests: Some(user.interests.clone()),
            user_id: Some(id.clone()),
        });
        Ok(id)
    }

    fn count(&self) -> Result<usize, DomainError> {
        Ok(self.users.lock().unwrap().len())
    }
}

/// Provider that always errors, as an unreachable model would.
pub struct FailingProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        Err(DomainError::ModelFailure("model offline".into()))
    }

    fn dimension(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// Provider returning canned vectors, optionally misbehaving.
pub struct FixedProvider {
    pub vector: Vec<f32>,
    pub dimension: usize,
    pub drop_last: bool,
}

#[async_trait::async_trait]
impl EmbeddingProvider for FixedProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut out: Vec<Vec<f32>> = texts.iter().map(|_| self.vector.clone()).collect();
        if self.drop_last {
            out.pop();
        }
        Ok(out)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

/// Wraps the hashing provider and records batch sizes.
pub struct CountingProvider {
    inner: HashingProvider,
    pub calls: AtomicUsize,
    pub batch_sizes: Mutex<Vec<usize>>,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self {
            inner: HashingProvider::default(),
            calls: AtomicUsize::new(0),
            batch_sizes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for CountingProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(texts.len());
        self.inner.embed(texts).await
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn model_name(&self) -> &str {
        "counting"
    }
}
