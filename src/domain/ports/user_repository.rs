use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user as the external store holds it. Any field may be missing;
/// the registry decides what is indexable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Input for seeding the external store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub interests: Vec<String>,
}

pub trait UserRepository: Send + Sync {
    /// The full population, in the store's natural order.
    fn fetch_all(&self) -> Result<Vec<RawUser>, DomainError>;
    /// Persist a user and return its generated identifier.
    fn add(&self, user: &NewUser) -> Result<String, DomainError>;
    fn count(&self) -> Result<usize, DomainError>;
}
