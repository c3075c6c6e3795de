use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The caller supplied no usable interests.
    #[error("No interests given: provide at least one non-empty interest")]
    EmptyInput,

    #[error("Embedding model failure: {0}")]
    ModelFailure(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Fetching the external user population failed. The index keeps its previous contents.
    #[error("User data source error: {0}")]
    DataSource(String),

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}
