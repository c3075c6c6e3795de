use crate::domain::values::embedding::Embedding;
use crate::domain::values::interest_set::InterestSet;
use serde::Serialize;

/// An indexed user: identity, interests and the vector derived from them.
///
/// Records are replaced whole; nothing mutates one in place once it is in the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: String,
    /// Account id from the external store; defaults to `id`.
    pub user_id: String,
    pub name: String,
    pub interests: InterestSet,
    #[serde(skip_serializing)]
    pub embedding: Embedding,
}

impl UserRecord {
    pub fn new(id: String, name: String, interests: InterestSet, embedding: Embedding) -> Self {
        Self {
            user_id: id.clone(),
            id,
            name,
            interests,
            embedding,
        }
    }

    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = user_id;
        self
    }
}
